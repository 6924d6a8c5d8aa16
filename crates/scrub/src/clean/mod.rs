//! The cleaning stages and the pipeline that runs them.

mod dedup;
mod impute;
mod infer;
mod normalize;
mod outliers;
mod pipeline;
mod report;

pub use dedup::Deduplicator;
pub use impute::MissingValueImputer;
pub use infer::TypeInferrer;
pub use normalize::ColumnNormalizer;
pub use outliers::{OutlierFilter, DEFAULT_IQR_MULTIPLIER};
pub use pipeline::{CleaningOptions, CleaningOutcome, Pipeline, PipelineConfig};
pub use report::{CleaningReport, Stage, StageChange, StageReport};

use crate::dataset::Dataset;
use crate::error::Result;

/// A transform over a whole dataset.
///
/// Stages take the dataset by value and hand back the next version,
/// recording what they changed.
pub trait CleaningStage {
    /// Which pipeline stage this is.
    fn stage(&self) -> Stage;

    /// Transform the dataset.
    fn apply(&self, data: Dataset, changes: &mut Vec<StageChange>) -> Result<Dataset>;
}
