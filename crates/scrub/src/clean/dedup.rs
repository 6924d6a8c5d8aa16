//! Case-insensitive duplicate row removal.

use std::collections::HashSet;

use tracing::debug;

use super::report::{Stage, StageChange};
use super::CleaningStage;
use crate::dataset::{ColumnData, Dataset};
use crate::error::Result;
use crate::input::DEFAULT_NULL_VALUES;

/// Removes rows whose text columns match an earlier row after trimming
/// and lowercasing.
///
/// Only text-like columns take part in the comparison; numeric and date
/// columns (IDs, counters) are carried along untouched. Text cells are
/// trimmed in the output, but keep their original case. A cell that trims
/// down to a null token (`"  "`, `" NA "`) becomes missing, matching how
/// ingestion reads it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator;

impl CleaningStage for Deduplicator {
    fn stage(&self) -> Stage {
        Stage::Deduplicate
    }

    fn apply(&self, mut data: Dataset, changes: &mut Vec<StageChange>) -> Result<Dataset> {
        let text_columns: Vec<usize> = data
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_text_like())
            .map(|(idx, _)| idx)
            .collect();

        if text_columns.is_empty() {
            debug!("No text columns; every row is unique");
            return Ok(data);
        }

        for &idx in &text_columns {
            if let ColumnData::Text(cells) = &mut data.columns_mut()[idx].data {
                for cell in cells.iter_mut() {
                    let Some(value) = cell.as_deref() else {
                        continue;
                    };
                    let trimmed = value.trim();
                    if DEFAULT_NULL_VALUES.contains(&trimmed) {
                        *cell = None;
                    } else if trimmed.len() != value.len() {
                        *cell = Some(trimmed.to_string());
                    }
                }
            }
        }

        let mut seen: HashSet<Vec<Option<String>>> = HashSet::new();
        let keep: Vec<bool> = (0..data.row_count())
            .map(|row| {
                let key = text_columns
                    .iter()
                    .map(|&idx| {
                        data.columns()[idx]
                            .data
                            .value_string(row)
                            .map(|s| s.to_lowercase())
                    })
                    .collect();
                seen.insert(key)
            })
            .collect();

        let removed = keep.iter().filter(|k| !**k).count();
        if removed > 0 {
            data.retain_rows(&keep);
            changes.push(StageChange::dataset(format!(
                "Removed {} duplicate rows",
                removed
            )));
        }
        debug!("Removed {} duplicate rows", removed);

        Ok(data)
    }
}
