//! IQR-based outlier row removal.

use tracing::debug;

use super::report::{Stage, StageChange};
use super::CleaningStage;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::Quartiles;

/// Default IQR fence multiplier.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Drops rows whose numeric values fall outside `[Q1 - k*IQR, Q3 + k*IQR]`.
///
/// Numeric-like columns are filtered one after another, each over the rows
/// that survived the previous columns, so column order affects the result.
/// A row missing a value in a filtered column fails the fence test and is
/// dropped. Missing values are left out of the quartile sample.
#[derive(Debug, Clone, Copy)]
pub struct OutlierFilter {
    iqr_multiplier: f64,
}

impl OutlierFilter {
    pub fn new(iqr_multiplier: f64) -> Self {
        Self { iqr_multiplier }
    }

    /// Compute the surviving-row mask for a dataset.
    pub fn surviving_rows(&self, data: &Dataset, changes: &mut Vec<StageChange>) -> Vec<bool> {
        data.columns()
            .iter()
            .fold(vec![true; data.row_count()], |mut keep, column| {
                let Some(values) = column.numeric_values() else {
                    return keep;
                };

                let surviving: Vec<f64> = values
                    .iter()
                    .zip(&keep)
                    .filter_map(|(value, kept)| if *kept { *value } else { None })
                    .collect();

                let Some(quartiles) = Quartiles::compute(&surviving) else {
                    return keep;
                };

                let mut outside = 0;
                let mut missing = 0;
                for (value, kept) in values.iter().zip(keep.iter_mut()) {
                    if !*kept {
                        continue;
                    }
                    match value {
                        Some(v) if quartiles.is_outlier_iqr(*v, self.iqr_multiplier) => {
                            *kept = false;
                            outside += 1;
                        }
                        Some(_) => {}
                        None => {
                            *kept = false;
                            missing += 1;
                        }
                    }
                }

                let (lower, upper) = quartiles.bounds(self.iqr_multiplier);
                if outside > 0 {
                    debug!(
                        "{}: dropped {} rows outside [{}, {}]",
                        column.name, outside, lower, upper
                    );
                    changes.push(StageChange::column(
                        &column.name,
                        format!(
                            "Removed {} rows outside [{}, {}]",
                            outside, lower, upper
                        ),
                    ));
                }
                if missing > 0 {
                    debug!("{}: dropped {} rows with no value", column.name, missing);
                    changes.push(StageChange::column(
                        &column.name,
                        format!("Removed {} rows with a missing value", missing),
                    ));
                }

                keep
            })
    }
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self::new(DEFAULT_IQR_MULTIPLIER)
    }
}

impl CleaningStage for OutlierFilter {
    fn stage(&self) -> Stage {
        Stage::RemoveOutliers
    }

    fn apply(&self, mut data: Dataset, changes: &mut Vec<StageChange>) -> Result<Dataset> {
        let keep = self.surviving_rows(&data, changes);
        data.retain_rows(&keep);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, ColumnData};

    fn filter(columns: Vec<Column>) -> Dataset {
        let data = Dataset::new(columns).unwrap();
        OutlierFilter::default().apply(data, &mut Vec::new()).unwrap()
    }

    #[test]
    fn test_drops_high_outlier() {
        let out = filter(vec![Column::new(
            "v",
            ColumnData::Integer(vec![Some(1), Some(2), Some(3), Some(4), Some(100)]),
        )]);
        assert_eq!(
            out.columns()[0].data,
            ColumnData::Integer(vec![Some(1), Some(2), Some(3), Some(4)])
        );
    }

    #[test]
    fn test_constant_column_keeps_everything() {
        let out = filter(vec![Column::new(
            "v",
            ColumnData::Decimal(vec![Some(5.0); 6]),
        )]);
        assert_eq!(out.row_count(), 6);
    }

    #[test]
    fn test_missing_values_dropped() {
        let out = filter(vec![Column::new(
            "v",
            ColumnData::Integer(vec![Some(1), None, Some(2), Some(3), Some(4), Some(100)]),
        )]);
        assert_eq!(
            out.columns()[0].data,
            ColumnData::Integer(vec![Some(1), Some(2), Some(3), Some(4)])
        );
    }

    #[test]
    fn test_missing_values_left_out_of_quartiles() {
        let data = Dataset::new(vec![Column::new(
            "v",
            ColumnData::Decimal(vec![None, Some(10.0), None, Some(11.0), Some(12.0), Some(13.0)]),
        )])
        .unwrap();
        let mut changes = Vec::new();
        let keep = OutlierFilter::default().surviving_rows(&data, &mut changes);
        assert_eq!(keep, vec![false, true, false, true, true, true]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].description, "Removed 2 rows with a missing value");
    }

    #[test]
    fn test_all_missing_column_is_not_filtered() {
        let out = filter(vec![
            Column::new("a", ColumnData::Integer(vec![Some(1), Some(2), Some(3)])),
            Column::new("b", ColumnData::Decimal(vec![None, None, None])),
        ]);
        assert_eq!(out.row_count(), 3);
    }

    #[test]
    fn test_text_columns_ignored() {
        let out = filter(vec![Column::text(
            "name",
            vec![Some("a"), Some("b"), Some("c"), Some("zzzzzzzz")],
        )]);
        assert_eq!(out.row_count(), 4);
    }

    #[test]
    fn test_numeric_text_columns_filtered() {
        let out = filter(vec![Column::text(
            "age",
            vec![Some("1"), Some("2"), Some("3"), Some("4"), Some("100")],
        )]);
        assert_eq!(out.row_count(), 4);
    }

    #[test]
    fn test_filtering_is_cumulative() {
        // Alone, b's fences over all five rows are [4, 20] and keep 14.
        // After a drops row 4, b's fences shrink to [8.5, 12.5] and 14 goes.
        let a = Column::new(
            "a",
            ColumnData::Integer(vec![Some(1), Some(2), Some(3), Some(4), Some(1000)]),
        );
        let b = Column::new(
            "b",
            ColumnData::Integer(vec![Some(10), Some(10), Some(10), Some(14), Some(50)]),
        );

        let mut changes = Vec::new();
        let data = Dataset::new(vec![a, b.clone()]).unwrap();
        let out = OutlierFilter::default().apply(data, &mut changes).unwrap();

        assert_eq!(
            out.column("a").unwrap().data,
            ColumnData::Integer(vec![Some(1), Some(2), Some(3)])
        );
        assert_eq!(changes.len(), 2);

        let alone = filter(vec![b]);
        assert_eq!(alone.row_count(), 4);
    }
}
