//! CSV ingestion: every field is read as text.

use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::SourceMetadata;
use crate::dataset::Dataset;
use crate::error::{Result, ScrubError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b',', b'\t', b';', b'|'];

/// Field values read as missing.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "", "NaN", "nan", "-NaN", "-nan", "NA", "N/A", "n/a", "NULL", "null", "None", "<NA>",
    "#N/A",
];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Exact field values that mean "no data".
    pub null_values: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Parses uploaded CSV data into an all-text dataset.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let contents = std::fs::read(path).map_err(|e| ScrubError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (dataset, mut metadata) = self.parse_upload(&name, &contents)?;
        metadata.path = Some(path.to_path_buf());
        Ok((dataset, metadata))
    }

    /// Parse uploaded bytes under the given display name.
    pub fn parse_upload(&self, name: &str, contents: &[u8]) -> Result<(Dataset, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => validate_delimiter(d, self.config.quote)?,
            None => detect_delimiter(contents)?,
        };

        let dataset = self.parse_bytes(contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            "Parsed '{}' as {}: {} rows x {} columns",
            name,
            format,
            dataset.row_count(),
            dataset.column_count()
        );

        let metadata = SourceMetadata::new(
            name,
            None,
            hash,
            contents.len() as u64,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Parse bytes with a known delimiter.
    pub(crate) fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let raw_headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if raw_headers.is_empty() || raw_headers.iter().all(|h| h.is_empty()) {
            return Err(ScrubError::EmptyData("No columns found".to_string()));
        }
        let headers = dedupe_headers(raw_headers);
        let expected_cols = headers.len();

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;

            if record.len() > expected_cols {
                return Err(ScrubError::Parse {
                    row: row_idx + 1,
                    column: expected_cols + 1,
                    message: format!(
                        "expected {} fields, found {}",
                        expected_cols,
                        record.len()
                    ),
                });
            }

            let mut row: Vec<Option<String>> =
                record.iter().map(|field| self.read_field(field)).collect();

            // Short rows are padded with missing cells
            row.resize(expected_cols, None);
            rows.push(row);
        }

        Dataset::from_text_rows(headers, rows)
    }

    fn read_field(&self, field: &str) -> Option<String> {
        if self.is_null_value(field) {
            None
        } else {
            Some(field.to_string())
        }
    }

    /// Check if a field represents a missing value.
    pub fn is_null_value(&self, value: &str) -> bool {
        self.config.null_values.iter().any(|null| null == value)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Suffix repeated header names with `.1`, `.2`, ...
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(headers.len());

    for header in headers {
        let mut candidate = header.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", header, n);
            n += 1;
        }
        seen.insert(candidate.clone());
        result.push(candidate);
    }

    result
}

/// Reject delimiters the reader cannot split on.
fn validate_delimiter(delimiter: u8, quote: u8) -> Result<u8> {
    if delimiter == quote || delimiter == b'\n' || delimiter == b'\r' || !delimiter.is_ascii() {
        return Err(ScrubError::InvalidDelimiter(format!(
            "{:?} cannot separate fields",
            delimiter as char
        )));
    }
    Ok(delimiter)
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ScrubError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; comma wins ties
        let score = if consistent {
            first_count * 1000
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ColumnType;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_quoted_commas() {
        let data = b"name;note\n\"Smith, J\";ok\n\"Doe, A\";fine";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_everything_as_text() {
        let parser = Parser::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.column_names(), vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert!(table
            .columns()
            .iter()
            .all(|c| c.column_type() == ColumnType::Text));
        assert_eq!(table.row(1).unwrap()[1], "25");
    }

    #[test]
    fn test_null_tokens_become_missing() {
        let parser = Parser::new();
        let data = b"a,b\n,NaN\nNA,x";
        let table = parser.parse_bytes(data, b',').unwrap();

        let a = table.column("a").unwrap();
        assert_eq!(a.data.missing_count(), 2);
        let b = table.column("b").unwrap();
        assert_eq!(b.data.missing_count(), 1);
        assert_eq!(b.data.value_string(1), Some("x".to_string()));
    }

    #[test]
    fn test_short_rows_padded() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"a,b,c\n1,2\n", b',').unwrap();
        assert_eq!(table.row(0).unwrap(), vec!["1", "2", "NaN"]);
    }

    #[test]
    fn test_long_rows_rejected() {
        let parser = Parser::new();
        let result = parser.parse_bytes(b"a,b\n1,2,3\n", b',');
        assert!(matches!(result, Err(ScrubError::Parse { row: 1, .. })));
    }

    #[test]
    fn test_duplicate_headers_suffixed() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"x,x,x\n1,2,3\n", b',').unwrap();
        assert_eq!(table.column_names(), vec!["x", "x.1", "x.2"]);
    }

    #[test]
    fn test_header_only() {
        let parser = Parser::new();
        let (table, meta) = parser.parse_upload("empty.csv", b"a,b\n").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
        assert_eq!(meta.row_count, 0);
    }

    #[test]
    fn test_empty_upload_rejected() {
        let parser = Parser::new();
        assert!(matches!(
            parser.parse_upload("empty.csv", b""),
            Err(ScrubError::EmptyData(_))
        ));
    }

    #[test]
    fn test_upload_metadata() {
        let parser = Parser::new();
        let (_, meta) = parser.parse_upload("people.csv", b"a,b\n1,2\n").unwrap();
        assert_eq!(meta.file, "people.csv");
        assert_eq!(meta.format, "csv");
        assert!(meta.hash.starts_with("sha256:"));
        assert_eq!(meta.size_bytes, 8);
        assert!(meta.path.is_none());
    }

    #[test]
    fn test_configured_delimiter_must_split_fields() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: Some(b'"'),
            ..ParserConfig::default()
        });
        let result = parser.parse_upload("data.csv", b"a,b\n1,2\n");
        assert!(matches!(result, Err(ScrubError::InvalidDelimiter(_))));
    }
}
