//! Fuzz target for the cleaning stages.
//!
//! Fuzzed text is placed into every cell of a small CSV so that type
//! conversion, date detection and the numeric stages see arbitrary values.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scrub::{CleaningOptions, Parser, Pipeline};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // One fuzzed value per line, repeated across three columns
    let mut csv = String::from("Name,Value,Other Value\n");
    for line in content.lines() {
        csv.push_str(&format!("{0},{0},{0}\n", line));
    }

    let Ok((dataset, _)) = Parser::new().parse_upload("fuzz.csv", csv.as_bytes()) else {
        return;
    };

    // Only stage-level data errors are acceptable; panics are not
    if let Ok(outcome) = Pipeline::new().run(&dataset, &CleaningOptions::all()) {
        assert!(outcome.dataset.row_count() <= dataset.row_count());
    }
});
