//! Previews and exports of cleaned data.

mod preview;
mod writer;

pub use preview::{Preview, DEFAULT_PREVIEW_ROWS};
pub use writer::{to_csv_string, to_json_records, write_delimited, write_delimited_file};
