//! Scrub: a CSV cleaning pipeline.
//!
//! Scrub ingests a CSV file with every field read as text, then runs up to
//! five independently toggleable stages in a fixed order:
//!
//! 1. **Deduplicate** rows, ignoring case and surrounding whitespace in text
//! 2. **Normalize column names** to lowercase with underscores
//! 3. **Impute missing values** with the rounded mean or the mode
//! 4. **Convert types** to integers, decimals or dates
//! 5. **Remove outliers** outside the IQR fences of each numeric column
//!
//! The uploaded dataset is never modified. Cleaned data can be previewed,
//! exported as CSV, or aggregated into chart data for a renderer.
//!
//! # Example
//!
//! ```no_run
//! use scrub::{CleaningOptions, Scrub};
//!
//! let scrub = Scrub::new();
//! let mut session = scrub.load("people.csv").unwrap();
//! let outcome = scrub.clean_session(&mut session, &CleaningOptions::all()).unwrap();
//!
//! println!("Rows removed: {}", outcome.report.rows_removed());
//! println!("{}", session.download_csv().unwrap().unwrap());
//! ```

pub mod chart;
pub mod clean;
pub mod dataset;
pub mod error;
pub mod input;
pub mod output;
pub mod session;
pub mod stats;

mod scrub;

pub use crate::scrub::{Scrub, ScrubConfig};
pub use chart::{Chart, ChartData, ChartKind, ChartRenderer, ChartRequest};
pub use clean::{CleaningOptions, CleaningOutcome, CleaningReport, Pipeline, PipelineConfig, Stage};
pub use dataset::{Column, ColumnData, ColumnType, Dataset, MISSING_MARKER};
pub use error::{Result, ScrubError};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use output::Preview;
pub use session::{CleaningSession, DOWNLOAD_FILE_NAME};
