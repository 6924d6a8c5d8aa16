//! Clean command - run the pipeline and write the cleaned data.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use scrub::output::{to_json_records, write_delimited_file};
use tracing::debug;

use super::{build_scrub, load_session, print_report};
use crate::cli::{InputArgs, OutputFormat, StageArgs};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    json: bool,
    stages: StageArgs,
    input: InputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let scrub = build_scrub(&input, None);
    let mut session = load_session(&scrub, &file, json)?;

    let options = stages.options();
    debug!("Stages enabled: {:?}", options.enabled_stages());
    let outcome = scrub.clean_session(&mut session, &options)?;

    let output_path = output.unwrap_or_else(|| default_output(&file, &format));
    match format {
        OutputFormat::Csv => write_delimited_file(&outcome.dataset, &output_path, b',')?,
        OutputFormat::Tsv => write_delimited_file(&outcome.dataset, &output_path, b'\t')?,
        OutputFormat::Json => {
            let records = to_json_records(&outcome.dataset);
            fs::write(&output_path, serde_json::to_string_pretty(&records)?)?;
        }
    }

    if json {
        println!("{}", outcome.report.to_json()?);
        return Ok(());
    }

    print_report(&outcome.report);
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

/// `<stem>_cleaned.<ext>` next to the input file.
fn default_output(file: &Path, format: &OutputFormat) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    file.with_file_name(format!("{}_cleaned.{}", stem, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_output() {
        let path = default_output(Path::new("/data/members.csv"), &OutputFormat::Tsv);
        assert_eq!(path, PathBuf::from("/data/members_cleaned.tsv"));
    }

    #[test]
    fn test_clean_writes_output() {
        let dir = TempDir::new().unwrap();
        let input_path = dir.path().join("members.csv");
        fs::write(&input_path, "Name,Age\nAlice,30\nalice,30\nBob,\n").unwrap();

        let stages = StageArgs {
            all: true,
            ..StageArgs::default()
        };
        let input = InputArgs {
            delimiter: None,
            iqr_multiplier: 1.5,
        };
        run(input_path.clone(), None, OutputFormat::Csv, true, stages, input).unwrap();

        let written = fs::read_to_string(dir.path().join("members_cleaned.csv")).unwrap();
        assert_eq!(written, "name,age\nAlice,30\nBob,30\n");
    }
}
