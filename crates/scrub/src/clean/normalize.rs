//! Column name standardization.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::report::{Stage, StageChange};
use super::CleaningStage;
use crate::dataset::Dataset;
use crate::error::Result;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lowercases column names and collapses whitespace runs to `_`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnNormalizer;

impl ColumnNormalizer {
    /// Canonical form of a single label.
    pub fn normalize_name(name: &str) -> String {
        WHITESPACE_RUN
            .replace_all(&name.to_lowercase(), "_")
            .into_owned()
    }
}

impl CleaningStage for ColumnNormalizer {
    fn stage(&self) -> Stage {
        Stage::NormalizeColumns
    }

    fn apply(&self, data: Dataset, changes: &mut Vec<StageChange>) -> Result<Dataset> {
        let mut columns = data.into_columns();
        let mut taken: HashSet<String> = HashSet::new();

        for column in &mut columns {
            let base = Self::normalize_name(&column.name);

            // Later columns colliding with an earlier name get a numeric suffix
            let mut renamed = base.clone();
            let mut n = 1;
            while taken.contains(&renamed) {
                renamed = format!("{}_{}", base, n);
                n += 1;
            }
            taken.insert(renamed.clone());

            if renamed != column.name {
                changes.push(StageChange::column(
                    renamed.clone(),
                    format!("Renamed '{}' to '{}'", column.name, renamed),
                ));
                column.name = renamed;
            }
        }

        Dataset::new(columns)
    }
}
