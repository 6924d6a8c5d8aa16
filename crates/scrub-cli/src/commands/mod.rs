//! CLI command implementations.

pub mod chart;
pub mod clean;
pub mod preview;
pub mod serve;

use std::path::Path;

use colored::Colorize;
use scrub::{CleaningReport, CleaningSession, ParserConfig, PipelineConfig, Scrub, ScrubConfig};

use crate::cli::InputArgs;

/// Build a Scrub instance from the shared input arguments.
pub(crate) fn build_scrub(input: &InputArgs, preview_rows: Option<usize>) -> Scrub {
    let mut config = ScrubConfig {
        parser: ParserConfig {
            delimiter: input.delimiter,
            ..ParserConfig::default()
        },
        pipeline: PipelineConfig {
            iqr_multiplier: input.iqr_multiplier,
        },
        ..ScrubConfig::default()
    };
    if let Some(rows) = preview_rows {
        config.preview_rows = rows;
    }
    Scrub::with_config(config)
}

/// Load a file into a session, failing early when it does not exist.
///
/// `quiet` suppresses progress output so stdout carries only JSON.
pub(crate) fn load_session(
    scrub: &Scrub,
    file: &Path,
    quiet: bool,
) -> Result<CleaningSession, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let session = scrub.load(file)?;
    if !quiet {
        println!(
            "{} {}",
            "Loaded".cyan().bold(),
            file.display().to_string().white()
        );
        println!(
            "  {} rows x {} columns ({})",
            session.source().row_count,
            session.source().column_count,
            session.source().format
        );
        println!();
    }

    Ok(session)
}

/// Print one line per stage and its changes.
pub(crate) fn print_report(report: &CleaningReport) {
    if report.stages.is_empty() {
        println!("{}", "No stages enabled - data left as uploaded.".yellow());
        return;
    }

    for stage in &report.stages {
        let removed = stage.rows_removed();
        let rows = if removed > 0 {
            format!("-{} rows", removed).red().to_string()
        } else {
            "no rows removed".dimmed().to_string()
        };
        println!("  {} {:<22} {}", "✓".green(), stage.stage.label(), rows);
        for change in &stage.changes {
            println!("      {}", change.description.dimmed());
        }
    }

    println!();
    println!(
        "{} {} -> {} rows",
        "Cleaned".green().bold(),
        report.rows_before.to_string().white().bold(),
        report.rows_after.to_string().white().bold()
    );
}
