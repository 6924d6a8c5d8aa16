//! Orchestration of the cleaning stages.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::dedup::Deduplicator;
use super::impute::MissingValueImputer;
use super::infer::TypeInferrer;
use super::normalize::ColumnNormalizer;
use super::outliers::{OutlierFilter, DEFAULT_IQR_MULTIPLIER};
use super::report::{CleaningReport, Stage, StageReport};
use super::CleaningStage;
use crate::dataset::Dataset;
use crate::error::{Result, ScrubError};

/// Which stages to run. Field order has no effect on execution order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CleaningOptions {
    pub drop_duplicates: bool,
    pub standardize_columns: bool,
    pub handle_missing: bool,
    pub convert_types: bool,
    pub remove_outliers: bool,
}

impl CleaningOptions {
    /// Every stage enabled.
    pub fn all() -> Self {
        Self {
            drop_duplicates: true,
            standardize_columns: true,
            handle_missing: true,
            convert_types: true,
            remove_outliers: true,
        }
    }

    /// Whether a stage is enabled.
    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Deduplicate => self.drop_duplicates,
            Stage::NormalizeColumns => self.standardize_columns,
            Stage::ImputeMissing => self.handle_missing,
            Stage::ConvertTypes => self.convert_types,
            Stage::RemoveOutliers => self.remove_outliers,
        }
    }

    /// Enabled stages in execution order.
    pub fn enabled_stages(&self) -> Vec<Stage> {
        Stage::ORDER
            .into_iter()
            .filter(|s| self.is_enabled(*s))
            .collect()
    }
}

/// Tunables for the pipeline stages.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// IQR fence multiplier for the outlier filter.
    pub iqr_multiplier: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
        }
    }
}

/// A cleaned dataset and the report of how it was produced.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub dataset: Dataset,
    pub report: CleaningReport,
}

/// Runs the enabled stages in their fixed order.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let k = self.config.iqr_multiplier;
        if !k.is_finite() || k < 0.0 {
            return Err(ScrubError::Config(format!(
                "IQR multiplier must be a non-negative number, got {}",
                k
            )));
        }
        Ok(())
    }

    /// Clean a copy of `original`. The input is never modified.
    ///
    /// Any stage failure aborts the run; there is no partial output.
    pub fn run(&self, original: &Dataset, options: &CleaningOptions) -> Result<CleaningOutcome> {
        self.validate()?;

        let stages = options.enabled_stages();
        info!(
            "Cleaning {} rows x {} columns with {} stages",
            original.row_count(),
            original.column_count(),
            stages.len()
        );

        let mut report = CleaningReport::new(original.row_count());
        let mut data = original.clone();

        for stage in stages {
            let rows_before = data.row_count();
            let mut changes = Vec::new();

            data = self.build_stage(stage).apply(data, &mut changes)?;

            debug!(
                "{}: {} -> {} rows, {} changes",
                stage,
                rows_before,
                data.row_count(),
                changes.len()
            );
            report.add_stage(StageReport {
                stage,
                rows_before,
                rows_after: data.row_count(),
                changes,
            });
        }

        info!(
            "Cleaning finished: {} rows remain ({} removed)",
            report.rows_after,
            report.rows_removed()
        );

        Ok(CleaningOutcome {
            dataset: data,
            report,
        })
    }

    fn build_stage(&self, stage: Stage) -> Box<dyn CleaningStage> {
        match stage {
            Stage::Deduplicate => Box::new(Deduplicator),
            Stage::NormalizeColumns => Box::new(ColumnNormalizer),
            Stage::ImputeMissing => Box::new(MissingValueImputer),
            Stage::ConvertTypes => Box::new(TypeInferrer),
            Stage::RemoveOutliers => Box::new(OutlierFilter::new(self.config.iqr_multiplier)),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, ColumnType};

    fn sample() -> Dataset {
        Dataset::new(vec![
            Column::text("Full Name", vec![Some("Ann"), Some(" ann"), Some("Ben"), Some("Cy")]),
            Column::text("Score", vec![Some("1"), Some("2"), None, Some("4")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_options_serde_camel_case() {
        let options: CleaningOptions =
            serde_json::from_str(r#"{"dropDuplicates": true, "convertTypes": true}"#).unwrap();
        assert!(options.drop_duplicates);
        assert!(options.convert_types);
        assert!(!options.remove_outliers);
        assert_eq!(
            options.enabled_stages(),
            vec![Stage::Deduplicate, Stage::ConvertTypes]
        );
    }

    #[test]
    fn test_no_options_is_identity() {
        let data = sample();
        let outcome = Pipeline::new().run(&data, &CleaningOptions::default()).unwrap();
        assert_eq!(outcome.dataset, data);
        assert!(outcome.report.stages.is_empty());
    }

    #[test]
    fn test_input_not_modified() {
        let data = sample();
        let copy = data.clone();
        Pipeline::new().run(&data, &CleaningOptions::all()).unwrap();
        assert_eq!(data, copy);
    }

    #[test]
    fn test_fixed_order() {
        let outcome = Pipeline::new().run(&sample(), &CleaningOptions::all()).unwrap();
        assert_eq!(outcome.report.stages_run(), Stage::ORDER.to_vec());

        let data = outcome.dataset;
        assert_eq!(data.column_names(), vec!["full_name", "score"]);
        assert_eq!(data.row_count(), 3);
        assert_eq!(data.column("score").unwrap().column_type(), ColumnType::Integer);
    }

    #[test]
    fn test_failure_aborts_run() {
        let data = Dataset::new(vec![Column::text::<&str>("empty", vec![None])]).unwrap();
        let options = CleaningOptions {
            handle_missing: true,
            ..Default::default()
        };
        let result = Pipeline::new().run(&data, &options);
        assert!(matches!(result, Err(ScrubError::NoFillValue { .. })));
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        let pipeline = Pipeline::with_config(PipelineConfig {
            iqr_multiplier: -1.0,
        });
        assert!(matches!(
            pipeline.run(&sample(), &CleaningOptions::all()),
            Err(ScrubError::Config(_))
        ));
    }
}
