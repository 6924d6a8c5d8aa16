//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use scrub::{ChartKind, CleaningOptions};
use std::net::IpAddr;
use std::path::PathBuf;

/// Scrub: toggleable cleaning pipeline for CSV data
#[derive(Parser)]
#[command(name = "scrub")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a CSV file and write the result
    Clean {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>_cleaned.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Print the cleaning report as JSON instead of a summary
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        stages: StageArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the first rows before and after cleaning
    Preview {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value = "10")]
        rows: usize,

        #[command(flatten)]
        stages: StageArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Chart a column of the cleaned data in the terminal
    Chart {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Chart kind (bar, pie, histogram, line, scatter)
        #[arg(short, long, default_value = "bar")]
        kind: ChartKind,

        /// Column to chart (lists eligible columns when omitted)
        #[arg(short, long)]
        column: Option<String>,

        /// Y axis column for scatter plots
        #[arg(short, long)]
        y: Option<String>,

        /// Output chart data as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        stages: StageArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Serve the cleaning API over HTTP
    Serve {
        /// CSV file to load at startup
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        #[command(flatten)]
        input: InputArgs,
    },
}

/// Stage toggles.
#[derive(Args, Clone, Debug, Default)]
pub struct StageArgs {
    /// Remove duplicate rows (case and whitespace insensitive)
    #[arg(long)]
    pub drop_duplicates: bool,

    /// Lowercase column names and replace whitespace with underscores
    #[arg(long)]
    pub standardize_columns: bool,

    /// Fill missing values with the rounded mean or the mode
    #[arg(long)]
    pub handle_missing: bool,

    /// Convert text columns to numbers and dates
    #[arg(long)]
    pub convert_types: bool,

    /// Remove rows outside the IQR fences of numeric columns
    #[arg(long)]
    pub remove_outliers: bool,

    /// Enable every stage
    #[arg(short, long)]
    pub all: bool,
}

impl StageArgs {
    pub fn options(&self) -> CleaningOptions {
        if self.all {
            return CleaningOptions::all();
        }
        CleaningOptions {
            drop_duplicates: self.drop_duplicates,
            standardize_columns: self.standardize_columns,
            handle_missing: self.handle_missing,
            convert_types: self.convert_types,
            remove_outliers: self.remove_outliers,
        }
    }
}

/// Ingestion and pipeline settings.
#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Field delimiter (auto-detected when omitted; "tab" for TSV)
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// IQR multiplier for outlier fences
    #[arg(long, default_value = "1.5")]
    pub iqr_multiplier: f64,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Delimiter must be a single ASCII character or \"tab\", got: {}",
            s
        )),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
