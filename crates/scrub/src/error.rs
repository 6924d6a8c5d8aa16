//! Error types for the Scrub library.

use std::path::PathBuf;
use thiserror::Error;

use crate::chart::ChartKind;

/// Main error type for Scrub operations.
#[derive(Debug, Error)]
pub enum ScrubError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structurally malformed input data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no header to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Columns of unequal length or duplicated names.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// A column needed imputation but has no value to impute from.
    #[error("Cannot fill missing values in '{column}': column has no non-missing values")]
    NoFillValue { column: String },

    /// A named column does not exist in the dataset.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// No column in the dataset can feed the requested chart.
    #[error("No columns available for a {kind} chart")]
    NoEligibleColumns { kind: ChartKind },

    /// The chosen column cannot feed the requested chart.
    #[error("Column '{column}' cannot be used for a {kind} chart")]
    IneligibleColumn { column: String, kind: ChartKind },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Scrub operations.
pub type Result<T> = std::result::Result<T, ScrubError>;
