//! What each cleaning stage did to the data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One toggleable transform of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Drop rows duplicated under trimmed, case-insensitive text comparison.
    Deduplicate,
    /// Lowercase column names and replace whitespace with underscores.
    NormalizeColumns,
    /// Fill missing cells with the column mean or mode.
    ImputeMissing,
    /// Reinterpret text columns as numbers or dates.
    ConvertTypes,
    /// Drop rows outside the per-column IQR fences.
    RemoveOutliers,
}

impl Stage {
    /// Execution order. Stages always run in this order when enabled.
    pub const ORDER: [Stage; 5] = [
        Stage::Deduplicate,
        Stage::NormalizeColumns,
        Stage::ImputeMissing,
        Stage::ConvertTypes,
        Stage::RemoveOutliers,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Deduplicate => "Drop Duplicates",
            Stage::NormalizeColumns => "Standardize Column Names",
            Stage::ImputeMissing => "Handle Missing Values",
            Stage::ConvertTypes => "Convert Data Types",
            Stage::RemoveOutliers => "Remove Outliers",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single change made by a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageChange {
    /// Column affected, if the change is column-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Description of the change.
    pub description: String,
}

impl StageChange {
    /// A change scoped to one column.
    pub fn column(column: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            description: description.into(),
        }
    }

    /// A change affecting the whole dataset.
    pub fn dataset(description: impl Into<String>) -> Self {
        Self {
            column: None,
            description: description.into(),
        }
    }
}

/// Outcome of one stage run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,
    pub rows_before: usize,
    pub rows_after: usize,
    pub changes: Vec<StageChange>,
}

impl StageReport {
    /// Rows dropped by this stage.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

/// Result of a full pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows in the uploaded dataset.
    pub rows_before: usize,
    /// Rows in the cleaned dataset.
    pub rows_after: usize,
    /// Reports for each stage that ran, in execution order.
    pub stages: Vec<StageReport>,
}

impl CleaningReport {
    /// Create an empty report for a dataset of `rows` rows.
    pub fn new(rows: usize) -> Self {
        Self {
            rows_before: rows,
            rows_after: rows,
            stages: Vec::new(),
        }
    }

    /// Record a finished stage.
    pub fn add_stage(&mut self, report: StageReport) {
        self.rows_after = report.rows_after;
        self.stages.push(report);
    }

    /// Total rows dropped across stages.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Report for one stage, if it ran.
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// Stages that ran, in order.
    pub fn stages_run(&self) -> Vec<Stage> {
        self.stages.iter().map(|s| s.stage).collect()
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
