//! Chart data preparation for an external renderer.
//!
//! This module decides which columns can feed which chart and aggregates
//! the data each chart needs. Drawing is left to a [`ChartRenderer`].

mod builder;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use builder::{build_chart, eligible_columns};

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Category frequencies as bars.
    Bar,
    /// Category frequencies as slices.
    Pie,
    /// Distribution of a numeric column.
    Histogram,
    /// Numeric values against row index.
    Line,
    /// One numeric column against another.
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Histogram,
        ChartKind::Line,
        ChartKind::Scatter,
    ];

    /// Whether the chart plots numeric columns (as opposed to categories).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ChartKind::Histogram | ChartKind::Line | ChartKind::Scatter
        )
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Pie => write!(f, "pie"),
            ChartKind::Histogram => write!(f, "histogram"),
            ChartKind::Line => write!(f, "line"),
            ChartKind::Scatter => write!(f, "scatter"),
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "histogram" | "hist" => Ok(ChartKind::Histogram),
            "line" => Ok(ChartKind::Line),
            "scatter" => Ok(ChartKind::Scatter),
            _ => Err(format!(
                "Unknown chart kind: {}. Use bar, pie, histogram, line, or scatter.",
                s
            )),
        }
    }
}

/// A chart the user asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub kind: ChartKind,
    /// Column to plot (the X axis for scatter plots).
    pub column: String,
    /// Y axis column for scatter plots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_column: Option<String>,
}

impl ChartRequest {
    pub fn new(kind: ChartKind, column: impl Into<String>) -> Self {
        Self {
            kind,
            column: column.into(),
            y_column: None,
        }
    }

    pub fn with_y(mut self, column: impl Into<String>) -> Self {
        self.y_column = Some(column.into());
        self
    }
}

/// Frequency of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// One histogram bucket, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Aggregated data for a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    /// Bar and pie charts: categories by descending frequency.
    Counts { counts: Vec<CategoryCount> },
    /// Histogram buckets.
    Histogram { bins: Vec<HistogramBin> },
    /// `(row index, value)` pairs, missing values skipped.
    Line { points: Vec<(usize, f64)> },
    /// `(x, y)` pairs from rows where both are present.
    Scatter {
        y_column: String,
        points: Vec<(f64, f64)>,
    },
}

/// A chart ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub column: String,
    pub data: ChartData,
}

/// Draws prepared charts. Implemented outside this crate by whatever
/// plotting surface is in use.
pub trait ChartRenderer {
    type Output;

    fn render(&self, chart: &Chart) -> Result<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("hist".parse::<ChartKind>().unwrap(), ChartKind::Histogram);
        assert!("donut".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_request_deserialize() {
        let request: ChartRequest =
            serde_json::from_str(r#"{"kind": "scatter", "column": "a", "y_column": "b"}"#)
                .unwrap();
        assert_eq!(request, ChartRequest::new(ChartKind::Scatter, "a").with_y("b"));
    }
}
