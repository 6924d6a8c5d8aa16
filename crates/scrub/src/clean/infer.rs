//! Type inference for text columns, followed by integer demotion.

use tracing::debug;

use super::report::{Stage, StageChange};
use super::CleaningStage;
use crate::dataset::parse::{looks_like_date, try_date, try_integer, try_numeric, whole_to_integer};
use crate::dataset::{Column, ColumnData, Dataset};
use crate::error::Result;

/// Reinterprets text columns as numbers or dates.
///
/// Numbers are tried first and win whenever a single cell parses, so a
/// column of dates with one numeric-looking value becomes numeric and the
/// dates turn into missing cells. Decimal columns whose values are all
/// whole are then demoted to integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeInferrer;

impl TypeInferrer {
    /// Convert one text column, if the data supports it.
    fn convert_column(column: &mut Column, changes: &mut Vec<StageChange>) {
        let ColumnData::Text(cells) = &column.data else {
            return;
        };

        let parsed: Vec<Option<f64>> = cells
            .iter()
            .map(|c| c.as_deref().and_then(try_numeric))
            .collect();
        let parsed_count = parsed.iter().filter(|v| v.is_some()).count();

        if parsed_count > 0 {
            let lost = cells.iter().filter(|c| c.is_some()).count() - parsed_count;
            let integers: Option<Vec<Option<i64>>> = cells
                .iter()
                .map(|c| c.as_deref().and_then(try_integer).map(Some))
                .collect();

            column.data = match integers {
                Some(values) => ColumnData::Integer(values),
                None => ColumnData::Decimal(parsed),
            };

            let mut description = format!("Converted to {}", column.column_type());
            if lost > 0 {
                description.push_str(&format!(" ({} unparseable values set to missing)", lost));
            }
            debug!("{}: {}", column.name, description);
            changes.push(StageChange::column(&column.name, description));
            return;
        }

        if cells.iter().flatten().any(|c| looks_like_date(c)) {
            let dates: Vec<_> = cells
                .iter()
                .map(|c| c.as_deref().and_then(try_date))
                .collect();
            let lost = cells.iter().filter(|c| c.is_some()).count()
                - dates.iter().filter(|d| d.is_some()).count();

            column.data = ColumnData::Date(dates);

            let mut description = "Converted to date".to_string();
            if lost > 0 {
                description.push_str(&format!(" ({} unparseable values set to missing)", lost));
            }
            debug!("{}: {}", column.name, description);
            changes.push(StageChange::column(&column.name, description));
        }
    }

    /// Demote a decimal column to integers when no fractional part is lost.
    fn demote_column(column: &mut Column, changes: &mut Vec<StageChange>) {
        let ColumnData::Decimal(values) = &column.data else {
            return;
        };

        let demoted: Option<Vec<Option<i64>>> = values
            .iter()
            .map(|v| match v {
                Some(x) => whole_to_integer(*x).map(Some),
                None => Some(None),
            })
            .collect();

        if let Some(integers) = demoted {
            column.data = ColumnData::Integer(integers);
            changes.push(StageChange::column(
                &column.name,
                "Demoted decimal to integer (no fractional values)",
            ));
        }
    }
}

impl CleaningStage for TypeInferrer {
    fn stage(&self) -> Stage {
        Stage::ConvertTypes
    }

    fn apply(&self, mut data: Dataset, changes: &mut Vec<StageChange>) -> Result<Dataset> {
        for column in data.columns_mut() {
            Self::convert_column(column, changes);
        }
        for column in data.columns_mut() {
            Self::demote_column(column, changes);
        }
        Ok(data)
    }
}
