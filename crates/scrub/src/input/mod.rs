//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig, DEFAULT_NULL_VALUES};
pub use source::SourceMetadata;
