//! Core type definitions for column representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendered form of a missing cell in previews and exports.
pub const MISSING_MARKER: &str = "NaN";

/// Effective type of a column at a point in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Text/string values. Every column starts here after ingestion.
    Text,
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Decimal,
    /// Calendar dates (no time component).
    Date,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Decimal)
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Text
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "text"),
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Decimal => write!(f, "decimal"),
            ColumnType::Date => write!(f, "date"),
        }
    }
}
