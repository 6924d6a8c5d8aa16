use tracing::debug;

use super::{CategoryCount, Chart, ChartData, ChartKind, ChartRequest, HistogramBin};
use crate::dataset::{Column, Dataset};
use crate::error::{Result, ScrubError};
use crate::stats;

/// Names of the columns that can feed a chart of `kind`.
///
/// Bar and pie charts take categorical columns (text and dates); the
/// other kinds take numeric-like columns. Scatter plots need at least two,
/// so fewer than two numeric columns means none is eligible.
pub fn eligible_columns(data: &Dataset, kind: ChartKind) -> Vec<&str> {
    let columns: Vec<&str> = data
        .columns()
        .iter()
        .filter(|c| is_eligible(c, kind))
        .map(|c| c.name.as_str())
        .collect();

    if kind == ChartKind::Scatter && columns.len() < 2 {
        return Vec::new();
    }
    columns
}

fn is_eligible(column: &Column, kind: ChartKind) -> bool {
    if kind.is_numeric() {
        column.is_numeric_like()
    } else {
        !column.is_numeric_like()
    }
}

/// Prepare the data for a requested chart.
///
/// Refuses with `NoEligibleColumns` when the dataset has no column the
/// chart kind can use.
pub fn build_chart(data: &Dataset, request: &ChartRequest) -> Result<Chart> {
    let kind = request.kind;
    let eligible = eligible_columns(data, kind);
    if eligible.is_empty() {
        return Err(ScrubError::NoEligibleColumns { kind });
    }

    let column = require_eligible(data, &request.column, kind)?;
    debug!("Building {} chart for '{}'", kind, column.name);

    let (title, chart_data) = match kind {
        ChartKind::Bar | ChartKind::Pie => {
            let title = match kind {
                ChartKind::Bar => format!("Bar Chart of {}", column.name),
                _ => format!("Pie Chart of {}", column.name),
            };
            (title, ChartData::Counts { counts: category_counts(column) })
        }
        ChartKind::Histogram => (
            format!("Histogram of {}", column.name),
            ChartData::Histogram {
                bins: histogram(&present_values(column)),
            },
        ),
        ChartKind::Line => {
            let points = numeric(column)
                .into_iter()
                .enumerate()
                .filter_map(|(idx, v)| v.map(|v| (idx, v)))
                .collect();
            (format!("Line Chart of {}", column.name), ChartData::Line { points })
        }
        ChartKind::Scatter => {
            let y_name = match &request.y_column {
                Some(name) => name.as_str(),
                None => eligible
                    .iter()
                    .copied()
                    .find(|name| *name != column.name)
                    .unwrap_or(column.name.as_str()),
            };
            let y = require_eligible(data, y_name, kind)?;
            let points = numeric(column)
                .into_iter()
                .zip(numeric(y))
                .filter_map(|pair| match pair {
                    (Some(x), Some(y)) => Some((x, y)),
                    _ => None,
                })
                .collect();
            (
                format!("Scatter Plot: {} vs {}", column.name, y.name),
                ChartData::Scatter {
                    y_column: y.name.clone(),
                    points,
                },
            )
        }
    };

    Ok(Chart {
        kind,
        title,
        column: column.name.clone(),
        data: chart_data,
    })
}

fn require_eligible<'a>(data: &'a Dataset, name: &str, kind: ChartKind) -> Result<&'a Column> {
    let column = data.require_column(name)?;
    if !is_eligible(column, kind) {
        return Err(ScrubError::IneligibleColumn {
            column: name.to_string(),
            kind,
        });
    }
    Ok(column)
}

fn numeric(column: &Column) -> Vec<Option<f64>> {
    column.numeric_values().unwrap_or_default()
}

fn present_values(column: &Column) -> Vec<f64> {
    numeric(column).into_iter().flatten().collect()
}

/// Category frequencies, most frequent first; ties keep first-seen order.
fn category_counts(column: &Column) -> Vec<CategoryCount> {
    let labels = (0..column.len()).filter_map(|row| column.data.value_string(row));
    let mut counts: Vec<CategoryCount> = stats::value_counts(labels)
        .into_iter()
        .map(|(label, count)| CategoryCount { label, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Equal-width buckets; the bucket count follows Sturges' rule.
fn histogram(values: &[f64]) -> Vec<HistogramBin> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let bin_count = ((values.len() as f64).log2().ceil() as usize + 1).max(1);
    let width = (max - min) / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bin_count {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in values {
        let idx = (((value - min) / width).floor() as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    bins
}
