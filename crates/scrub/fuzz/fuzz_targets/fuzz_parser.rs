//! Fuzz target for CSV ingestion.
//!
//! The parser must never panic on malformed input, whatever the delimiter,
//! quoting or row lengths.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scrub::output::to_csv_string;
use scrub::Parser;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok((dataset, metadata)) = parser.parse_upload("fuzz.csv", data) {
        assert_eq!(dataset.row_count(), metadata.row_count);
        assert_eq!(dataset.column_count(), metadata.column_count);

        // Whatever was read must serialize again
        let _ = to_csv_string(&dataset);
    }
});
