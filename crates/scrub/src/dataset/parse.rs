//! Per-cell reinterpretation of text values.
//!
//! Every function here is pure and reports failure with `None`; callers
//! decide whether a failed cell becomes missing.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Canonical date shapes that trigger date conversion of a text column.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), // ISO date
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(), // day/month/year
    ]
});

/// Formats tried, in order, once a column has been identified as dates.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Datetime formats whose time part is discarded.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Canonical output format for dates.
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// Parse a text cell as a finite number.
pub fn try_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a text cell as an integer literal.
pub fn try_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Parse a text cell as a calendar date.
pub fn try_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Check whether a cell has one of the canonical date shapes.
pub fn looks_like_date(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value))
}

/// Render a decimal the way a dataframe writer does: whole values keep a
/// trailing `.0`.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Convert a whole-valued decimal to an integer when it fits.
pub fn whole_to_integer(value: f64) -> Option<i64> {
    if value.fract() != 0.0 || !value.is_finite() {
        return None;
    }
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_numeric() {
        assert_eq!(try_numeric("42"), Some(42.0));
        assert_eq!(try_numeric(" 3.5 "), Some(3.5));
        assert_eq!(try_numeric("-1e3"), Some(-1000.0));
        assert_eq!(try_numeric(""), None);
        assert_eq!(try_numeric("abc"), None);
        assert_eq!(try_numeric("inf"), None);
        assert_eq!(try_numeric("NaN"), None);
    }

    #[test]
    fn test_try_integer() {
        assert_eq!(try_integer("7"), Some(7));
        assert_eq!(try_integer("7.0"), None);
    }

    #[test]
    fn test_looks_like_date() {
        assert!(looks_like_date("2023-01-01"));
        assert!(looks_like_date("15/03/2023"));
        assert!(!looks_like_date("2023/01/01"));
        assert!(!looks_like_date("2023-01-01 extra"));
        assert!(!looks_like_date("Jan 1 2023"));
    }

    #[test]
    fn test_try_date() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 15).unwrap();
        assert_eq!(try_date("2023-03-15"), Some(expected));
        assert_eq!(try_date("15/03/2023"), Some(expected));
        assert_eq!(try_date("2023/03/15"), Some(expected));
        assert_eq!(try_date("2023-03-15 10:30:00"), Some(expected));
        assert_eq!(try_date("2023-02-30"), None);
        assert_eq!(try_date("bad"), None);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(3.0), "3.0");
        assert_eq!(format_decimal(2.5), "2.5");
        assert_eq!(format_decimal(-0.25), "-0.25");
    }

    #[test]
    fn test_whole_to_integer() {
        assert_eq!(whole_to_integer(4.0), Some(4));
        assert_eq!(whole_to_integer(4.5), None);
        assert_eq!(whole_to_integer(1e20), None);
    }
}
