//! Typed tabular data model.

mod column;
pub mod parse;
mod table;
mod types;

pub use column::{Column, ColumnData};
pub use table::Dataset;
pub use types::{ColumnType, MISSING_MARKER};
