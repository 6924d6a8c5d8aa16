//! Missing value imputation.

use tracing::debug;

use super::report::{Stage, StageChange};
use super::CleaningStage;
use crate::dataset::parse::{format_decimal, whole_to_integer};
use crate::dataset::{Column, ColumnData, Dataset};
use crate::error::{Result, ScrubError};
use crate::stats;

/// Fills missing cells with the rounded mean (numeric-like columns) or the
/// mode (everything else).
///
/// The mean is rounded to a whole number for every numeric column,
/// including decimal ones. Halves round to even.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingValueImputer;

impl MissingValueImputer {
    /// Fill one column, returning a description of the fill.
    fn impute_column(column: &mut Column) -> Result<String> {
        let missing = column.data.missing_count();
        let name = column.name.as_str();

        let numeric = match &column.data {
            ColumnData::Text(_) => column.numeric_values(),
            _ => None,
        };

        let fill = match (&mut column.data, numeric) {
            (ColumnData::Integer(values), _) => {
                let as_f64: Vec<Option<f64>> =
                    values.iter().map(|v| v.map(|n| n as f64)).collect();
                let fill = rounded_mean(name, &as_f64)? as i64;
                fill_missing(values, fill);
                fill.to_string()
            }
            (ColumnData::Decimal(values), _) => {
                let fill = rounded_mean(name, values)?;
                fill_missing(values, fill);
                format_decimal(fill)
            }
            (ColumnData::Text(values), Some(numbers)) => {
                let mean = rounded_mean(name, &numbers)?;
                let fill = whole_to_integer(mean)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format_decimal(mean));
                fill_missing(values, fill.clone());
                fill
            }
            (ColumnData::Text(values), None) => {
                let fill = stats::mode(values.iter().flatten())
                    .cloned()
                    .ok_or_else(|| no_fill_value(name))?;
                fill_missing(values, fill.clone());
                fill
            }
            (ColumnData::Date(values), _) => {
                let fill = stats::mode(values.iter().flatten())
                    .copied()
                    .ok_or_else(|| no_fill_value(name))?;
                fill_missing(values, fill);
                fill.to_string()
            }
        };

        Ok(format!("Filled {} missing values with '{}'", missing, fill))
    }
}

fn rounded_mean(column: &str, values: &[Option<f64>]) -> Result<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    stats::mean(&present)
        .map(f64::round_ties_even)
        .ok_or_else(|| no_fill_value(column))
}

fn fill_missing<T: Clone>(values: &mut [Option<T>], fill: T) {
    for value in values.iter_mut().filter(|v| v.is_none()) {
        *value = Some(fill.clone());
    }
}

fn no_fill_value(column: &str) -> ScrubError {
    ScrubError::NoFillValue {
        column: column.to_string(),
    }
}

impl CleaningStage for MissingValueImputer {
    fn stage(&self) -> Stage {
        Stage::ImputeMissing
    }

    fn apply(&self, mut data: Dataset, changes: &mut Vec<StageChange>) -> Result<Dataset> {
        for column in data.columns_mut() {
            if column.data.missing_count() == 0 {
                continue;
            }
            let description = Self::impute_column(column)?;
            debug!("{}: {}", column.name, description);
            changes.push(StageChange::column(&column.name, description));
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn impute(column: Column) -> Result<Column> {
        let data = Dataset::new(vec![column])?;
        let out = MissingValueImputer.apply(data, &mut Vec::new())?;
        Ok(out.into_columns().remove(0))
    }

    #[test]
    fn test_numeric_text_mean() {
        let col = impute(Column::text("age", vec![Some("10"), Some("20"), None])).unwrap();
        assert_eq!(
            col.data,
            ColumnData::Text(vec![
                Some("10".to_string()),
                Some("20".to_string()),
                Some("15".to_string()),
            ])
        );
    }

    #[test]
    fn test_decimal_mean_is_rounded() {
        let column = Column::new("x", ColumnData::Decimal(vec![Some(1.5), Some(2.0), None]));
        let col = impute(column).unwrap();
        // mean 1.75 rounds to 2
        assert_eq!(col.data, ColumnData::Decimal(vec![Some(1.5), Some(2.0), Some(2.0)]));
    }

    #[test]
    fn test_integer_mean_ties_to_even() {
        let column = Column::new("n", ColumnData::Integer(vec![Some(12), Some(13), None]));
        let col = impute(column).unwrap();
        // mean 12.5 rounds to 12
        assert_eq!(col.data, ColumnData::Integer(vec![Some(12), Some(13), Some(12)]));
    }

    #[test]
    fn test_categorical_mode() {
        let col = impute(Column::text("c", vec![Some("a"), Some("a"), Some("b"), None])).unwrap();
        assert_eq!(col.data.value_string(3), Some("a".to_string()));
    }

    #[test]
    fn test_mode_tie_first_occurrence() {
        let col = impute(Column::text("c", vec![Some("b"), Some("a"), None])).unwrap();
        assert_eq!(col.data.value_string(2), Some("b".to_string()));
    }

    #[test]
    fn test_date_mode() {
        let d1 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let column = Column::new("d", ColumnData::Date(vec![Some(d2), Some(d1), Some(d2), None]));
        let col = impute(column).unwrap();
        assert_eq!(col.data.render(3), "2023-06-01");
    }

    #[test]
    fn test_complete_column_untouched() {
        let original = Column::text("c", vec![Some("x"), Some("y")]);
        let mut changes = Vec::new();
        let data = Dataset::new(vec![original.clone()]).unwrap();
        let out = MissingValueImputer.apply(data, &mut changes).unwrap();
        assert_eq!(out.columns()[0], original);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_all_missing_column_fails() {
        let result = impute(Column::text::<&str>("empty", vec![None, None]));
        match result {
            Err(ScrubError::NoFillValue { column }) => assert_eq!(column, "empty"),
            other => panic!("expected NoFillValue, got {:?}", other),
        }
    }
}
