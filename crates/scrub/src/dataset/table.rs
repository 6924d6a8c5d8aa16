//! The in-memory dataset flowing through the pipeline.

use std::collections::HashSet;

use crate::error::{Result, ScrubError};

use super::column::{Column, ColumnData};

/// An ordered set of equal-length, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset, checking that names are unique and lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut names = HashSet::new();
        for column in &columns {
            if !names.insert(column.name.as_str()) {
                return Err(ScrubError::InvalidDataset(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(ScrubError::InvalidDataset(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name,
                    bad.len(),
                    expected
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Build an all-text dataset from row-major cells.
    pub fn from_text_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let mut cells: Vec<Vec<Option<String>>> = headers
            .iter()
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ScrubError::Parse {
                    row: row_idx + 1,
                    column: row.len(),
                    message: format!("expected {} fields, found {}", headers.len(), row.len()),
                });
            }
            for (col_idx, cell) in row.into_iter().enumerate() {
                cells[col_idx].push(cell);
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::new(name, ColumnData::Text(values)))
            .collect();

        Self::new(columns)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column labels in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column by name, failing with `ColumnNotFound`.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| ScrubError::ColumnNotFound(name.to_string()))
    }

    /// Render one row for display.
    pub fn row(&self, index: usize) -> Option<Vec<String>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.data.render(index)).collect())
    }

    /// Iterate over rendered rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        (0..self.row_count()).map(move |idx| {
            self.columns.iter().map(|c| c.data.render(idx)).collect()
        })
    }

    /// Keep only rows whose mask entry is `true`.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        for column in &mut self.columns {
            column.data.retain_rows(keep);
        }
    }

    /// The first `n` rows as a new dataset.
    pub fn head(&self, n: usize) -> Dataset {
        let mut head = self.clone();
        for column in &mut head.columns {
            column.data.truncate(n);
        }
        head
    }

    /// Mutable access for stages that keep the shape intact.
    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}
