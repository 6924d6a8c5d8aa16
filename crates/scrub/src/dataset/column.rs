//! Typed column storage.

use chrono::NaiveDate;

use super::parse::{format_decimal, try_numeric, DATE_OUTPUT_FORMAT};
use super::types::{ColumnType, MISSING_MARKER};

/// Cell storage for one column, tagged by its effective type.
///
/// `None` is the only representation of a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<Option<String>>),
    Integer(Vec<Option<i64>>),
    Decimal(Vec<Option<f64>>),
    Date(Vec<Option<NaiveDate>>),
}

impl ColumnData {
    /// The effective type of the stored cells.
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Text(_) => ColumnType::Text,
            ColumnData::Integer(_) => ColumnType::Integer,
            ColumnData::Decimal(_) => ColumnType::Decimal,
            ColumnData::Date(_) => ColumnType::Date,
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Decimal(v) => v.len(),
            ColumnData::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the cell at `row` is missing.
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            ColumnData::Text(v) => matches!(v.get(row), Some(None)),
            ColumnData::Integer(v) => matches!(v.get(row), Some(None)),
            ColumnData::Decimal(v) => matches!(v.get(row), Some(None)),
            ColumnData::Date(v) => matches!(v.get(row), Some(None)),
        }
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_missing(row)).count()
    }

    /// Render a cell as text, or `None` when it is missing or out of range.
    pub fn value_string(&self, row: usize) -> Option<String> {
        match self {
            ColumnData::Text(v) => v.get(row)?.clone(),
            ColumnData::Integer(v) => v.get(row)?.map(|n| n.to_string()),
            ColumnData::Decimal(v) => v.get(row)?.map(format_decimal),
            ColumnData::Date(v) => v
                .get(row)?
                .map(|d| d.format(DATE_OUTPUT_FORMAT).to_string()),
        }
    }

    /// Render a cell for display, using the missing-marker for gaps.
    pub fn render(&self, row: usize) -> String {
        self.value_string(row)
            .unwrap_or_else(|| MISSING_MARKER.to_string())
    }

    /// Keep only the rows whose mask entry is `true`.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        match self {
            ColumnData::Text(v) => retain_by_mask(v, keep),
            ColumnData::Integer(v) => retain_by_mask(v, keep),
            ColumnData::Decimal(v) => retain_by_mask(v, keep),
            ColumnData::Date(v) => retain_by_mask(v, keep),
        }
    }

    /// Drop every row past `len`.
    pub fn truncate(&mut self, len: usize) {
        match self {
            ColumnData::Text(v) => v.truncate(len),
            ColumnData::Integer(v) => v.truncate(len),
            ColumnData::Decimal(v) => v.truncate(len),
            ColumnData::Date(v) => v.truncate(len),
        }
    }
}

fn retain_by_mask<T>(values: &mut Vec<T>, keep: &[bool]) {
    let mut mask = keep.iter();
    values.retain(|_| *mask.next().unwrap_or(&true));
}

/// A named column of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column label.
    pub name: String,
    /// Typed cells.
    pub data: ColumnData,
}

impl Column {
    /// Create a column from typed data.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Create a text column. Convenient for tests and ingestion.
    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        Self::new(
            name,
            ColumnData::Text(values.into_iter().map(|v| v.map(Into::into)).collect()),
        )
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Numeric view of the column if it is numeric-like.
    ///
    /// Integer and Decimal columns always qualify. A Text column qualifies
    /// when it has at least one non-missing cell and every non-missing cell
    /// parses as a finite number, matching how dataframe readers type
    /// numeric CSV columns on load.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        match &self.data {
            ColumnData::Integer(v) => Some(v.iter().map(|c| c.map(|n| n as f64)).collect()),
            ColumnData::Decimal(v) => Some(v.clone()),
            ColumnData::Text(v) => {
                let mut seen = false;
                let mut values = Vec::with_capacity(v.len());
                for cell in v {
                    match cell {
                        Some(s) => {
                            values.push(Some(try_numeric(s)?));
                            seen = true;
                        }
                        None => values.push(None),
                    }
                }
                seen.then_some(values)
            }
            ColumnData::Date(_) => None,
        }
    }

    /// Whether the column is numeric-like.
    pub fn is_numeric_like(&self) -> bool {
        match &self.data {
            ColumnData::Integer(_) | ColumnData::Decimal(_) => true,
            ColumnData::Text(_) => self.numeric_values().is_some(),
            ColumnData::Date(_) => false,
        }
    }

    /// Whether the column holds free text (Text and not numeric-like).
    pub fn is_text_like(&self) -> bool {
        matches!(self.data, ColumnData::Text(_)) && !self.is_numeric_like()
    }
}
