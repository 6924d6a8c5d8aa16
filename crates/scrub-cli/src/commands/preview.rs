//! Preview command - show the first rows before and after cleaning.

use std::path::PathBuf;

use colored::Colorize;
use scrub::Preview;

use super::{build_scrub, load_session, print_report};
use crate::cli::{InputArgs, StageArgs};

pub fn run(
    file: PathBuf,
    rows: usize,
    stages: StageArgs,
    input: InputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let scrub = build_scrub(&input, Some(rows));
    let mut session = load_session(&scrub, &file, false)?;
    let preview_rows = scrub.config().preview_rows;

    println!("{}", "Original data:".yellow().bold());
    print!("{}", format_table(&session.original_preview(preview_rows)));

    let options = stages.options();
    if options.enabled_stages().is_empty() {
        return Ok(());
    }

    println!();
    let outcome = scrub.clean_session(&mut session, &options)?;
    print_report(&outcome.report);

    if let Some(preview) = session.cleaned_preview(preview_rows) {
        println!();
        println!("{}", "Cleaned data:".green().bold());
        print!("{}", format_table(&preview));
    }

    Ok(())
}

/// Render a preview as an aligned text table.
pub(crate) fn format_table(preview: &Preview) -> String {
    let mut widths: Vec<usize> = preview.headers.iter().map(|h| h.chars().count()).collect();
    for row in &preview.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };

    let mut out = format_row(&preview.headers);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", rule.join("  ")));
    for row in &preview.rows {
        out.push_str(&format_row(row));
    }
    if preview.truncated {
        out.push_str(&format!(
            "  ... {} of {} rows shown\n",
            preview.rows.len(),
            preview.total_rows
        ));
    }

    out
}
