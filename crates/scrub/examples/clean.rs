//! Example: Clean a CSV file with every stage enabled.
//!
//! Usage:
//!   cargo run --example clean -- <file_path>

use std::env;
use std::path::Path;

use scrub::{CleaningOptions, Scrub};

fn main() -> scrub::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example clean -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Scrub: {}", file_path);
    println!("{}", separator);
    println!();

    let scrub = Scrub::new();
    let mut session = scrub.load(path)?;

    println!("## Source");
    println!("  Format: {}", session.source().format);
    println!("  Rows: {}", session.source().row_count);
    println!("  Columns: {}", session.source().column_count);
    println!();

    let outcome = scrub.clean_session(&mut session, &CleaningOptions::all())?;

    println!("## Stages");
    for stage in &outcome.report.stages {
        println!(
            "  {:<24} {:>6} -> {:<6} rows",
            stage.stage.label(),
            stage.rows_before,
            stage.rows_after
        );
        for change in &stage.changes {
            println!("      {}", change.description);
        }
    }
    println!();

    let preview = session
        .cleaned_preview(scrub.config().preview_rows)
        .unwrap_or_else(|| session.original_preview(scrub.config().preview_rows));

    println!("## Preview");
    println!("  {}", preview.headers.join(" | "));
    for row in &preview.rows {
        println!("  {}", row.join(" | "));
    }
    if preview.truncated {
        println!("  ... {} rows total", preview.total_rows);
    }

    Ok(())
}
