//! Chart command - draw a chart of the cleaned data in the terminal.

use std::path::PathBuf;

use colored::Colorize;
use scrub::chart::{CategoryCount, HistogramBin};
use scrub::{Chart, ChartData, ChartKind, ChartRenderer, ChartRequest, ScrubError};

use super::{build_scrub, load_session};
use crate::cli::{InputArgs, StageArgs};

pub fn run(
    file: PathBuf,
    kind: ChartKind,
    column: Option<String>,
    y: Option<String>,
    json: bool,
    stages: StageArgs,
    input: InputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let scrub = build_scrub(&input, None);
    let mut session = load_session(&scrub, &file, json)?;
    scrub.clean_session(&mut session, &stages.options())?;

    let eligible = session.chart_columns(kind);
    if eligible.is_empty() {
        println!(
            "{} No columns can be plotted as a {} chart.",
            "Warning:".yellow().bold(),
            kind
        );
        return Ok(());
    }

    let Some(column) = column else {
        println!("Columns available for a {} chart:", kind.to_string().cyan());
        for name in eligible {
            println!("  {}", name);
        }
        return Ok(());
    };

    let request = ChartRequest {
        kind,
        column,
        y_column: y,
    };
    let chart = match session.chart(&request) {
        Ok(Some(chart)) => chart,
        Ok(None) => return Err("No cleaned data to chart".into()),
        Err(ScrubError::IneligibleColumn { column, kind }) => {
            return Err(format!(
                "Column '{}' cannot be plotted as a {} chart. Choose one of: {}",
                column,
                kind,
                eligible.join(", ")
            )
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    } else {
        print!("{}", TerminalRenderer::default().render(&chart)?);
    }

    Ok(())
}

/// Draws charts as text.
pub struct TerminalRenderer {
    /// Width of the longest bar or of the plot area.
    pub width: usize,
    /// Height of the scatter plot area.
    pub height: usize,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            width: 50,
            height: 16,
        }
    }
}

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

impl ChartRenderer for TerminalRenderer {
    type Output = String;

    fn render(&self, chart: &Chart) -> scrub::Result<String> {
        let mut out = format!("{}\n\n", chart.title.cyan().bold());

        let body = match &chart.data {
            ChartData::Counts { counts } if chart.kind == ChartKind::Pie => self.shares(counts),
            ChartData::Counts { counts } => self.bars(counts),
            ChartData::Histogram { bins } => self.histogram(bins),
            ChartData::Line { points } => self.sparkline(points),
            ChartData::Scatter { y_column, points } => {
                format!("{}{}\n", self.scatter(points), format!("y: {}", y_column).dimmed())
            }
        };
        out.push_str(&body);

        Ok(out)
    }
}

impl TerminalRenderer {
    fn bar(&self, count: usize, max: usize) -> String {
        let len = if max == 0 {
            0
        } else {
            (count * self.width).div_ceil(max)
        };
        "█".repeat(len)
    }

    fn bars(&self, counts: &[CategoryCount]) -> String {
        let label_width = counts.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0);

        counts
            .iter()
            .map(|c| {
                format!(
                    "  {:<width$}  {} {}\n",
                    c.label,
                    self.bar(c.count, max),
                    c.count,
                    width = label_width
                )
            })
            .collect()
    }

    fn shares(&self, counts: &[CategoryCount]) -> String {
        let label_width = counts.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
        let total: usize = counts.iter().map(|c| c.count).sum();

        counts
            .iter()
            .map(|c| {
                let share = c.count as f64 / total.max(1) as f64;
                format!(
                    "  {:<width$}  {:>5.1}%  {}\n",
                    c.label,
                    share * 100.0,
                    self.bar(c.count, total),
                    width = label_width
                )
            })
            .collect()
    }

    fn histogram(&self, bins: &[HistogramBin]) -> String {
        let labels: Vec<String> = bins
            .iter()
            .map(|b| format!("[{:.2}, {:.2}]", b.start, b.end))
            .collect();
        let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
        let max = bins.iter().map(|b| b.count).max().unwrap_or(0);

        bins.iter()
            .zip(&labels)
            .map(|(bin, label)| {
                format!(
                    "  {:<width$}  {} {}\n",
                    label,
                    self.bar(bin.count, max),
                    bin.count,
                    width = label_width
                )
            })
            .collect()
    }

    fn sparkline(&self, points: &[(usize, f64)]) -> String {
        if points.is_empty() {
            return String::new();
        }

        let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        let line: String = points
            .iter()
            .map(|(_, v)| {
                let level = if span == 0.0 {
                    SPARKS.len() / 2
                } else {
                    (((v - min) / span) * (SPARKS.len() - 1) as f64).round() as usize
                };
                SPARKS[level.min(SPARKS.len() - 1)]
            })
            .collect();

        format!("  {}\n  min {}  max {}\n", line, min, max)
    }

    fn scatter(&self, points: &[(f64, f64)]) -> String {
        if points.is_empty() {
            return String::new();
        }

        let (min_x, max_x) = bounds(points.iter().map(|p| p.0));
        let (min_y, max_y) = bounds(points.iter().map(|p| p.1));
        let mut grid = vec![vec![' '; self.width]; self.height];

        for (x, y) in points {
            let col = scale(*x, min_x, max_x, self.width);
            let row = self.height - 1 - scale(*y, min_y, max_y, self.height);
            grid[row][col] = '•';
        }

        let mut out = String::new();
        for row in grid {
            out.push_str("  │");
            out.extend(row);
            out.push('\n');
        }
        out.push_str(&format!("  └{}\n", "─".repeat(self.width)));
        out.push_str(&format!(
            "  x: {} .. {}   y: {} .. {}\n",
            min_x, max_x, min_y, max_y
        ));
        out
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Map a value onto `0..cells`.
fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max == min {
        return cells / 2;
    }
    let pos = ((value - min) / (max - min) * (cells - 1) as f64).round() as usize;
    pos.min(cells - 1)
}
