//! Tabular previews of a dataset.

use serde::{Deserialize, Serialize};

use crate::dataset::{ColumnType, Dataset};

/// Rows shown in a preview unless configured otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// The first rows of a dataset, rendered as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    /// Column headers.
    pub headers: Vec<String>,
    /// Effective type of each column.
    pub column_types: Vec<ColumnType>,
    /// Rendered rows (first N rows).
    pub rows: Vec<Vec<String>>,
    /// Total row count in the dataset.
    pub total_rows: usize,
    /// Whether rows were left out.
    pub truncated: bool,
}

impl Preview {
    /// Preview the first `max_rows` rows.
    pub fn of(data: &Dataset, max_rows: usize) -> Self {
        let total_rows = data.row_count();
        Self {
            headers: data.column_names().into_iter().map(String::from).collect(),
            column_types: data.columns().iter().map(|c| c.column_type()).collect(),
            rows: data.rows().take(max_rows).collect(),
            total_rows,
            truncated: total_rows > max_rows,
        }
    }
}
