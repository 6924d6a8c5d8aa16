//! Session context for one uploaded dataset.

use tracing::{info, warn};

use crate::chart::{build_chart, eligible_columns, Chart, ChartKind, ChartRequest};
use crate::clean::{CleaningOptions, CleaningOutcome, CleaningReport, Pipeline};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::input::SourceMetadata;
use crate::output::{to_csv_string, Preview};

/// File name offered for the cleaned download.
pub const DOWNLOAD_FILE_NAME: &str = "cleaned_data.csv";

/// The uploaded dataset and the result of the last successful cleaning run.
///
/// The original dataset is never modified. A failed run leaves the
/// previous cleaned result in place.
#[derive(Debug, Clone)]
pub struct CleaningSession {
    original: Dataset,
    source: SourceMetadata,
    cleaned: Option<CleaningOutcome>,
}

impl CleaningSession {
    pub fn new(original: Dataset, source: SourceMetadata) -> Self {
        Self {
            original,
            source,
            cleaned: None,
        }
    }

    pub fn original(&self) -> &Dataset {
        &self.original
    }

    pub fn source(&self) -> &SourceMetadata {
        &self.source
    }

    /// The last successfully cleaned dataset, if any.
    pub fn cleaned(&self) -> Option<&Dataset> {
        self.cleaned.as_ref().map(|outcome| &outcome.dataset)
    }

    pub fn report(&self) -> Option<&CleaningReport> {
        self.cleaned.as_ref().map(|outcome| &outcome.report)
    }

    /// Run the pipeline over the original dataset and keep the result.
    pub fn clean(
        &mut self,
        pipeline: &Pipeline,
        options: &CleaningOptions,
    ) -> Result<&CleaningOutcome> {
        match pipeline.run(&self.original, options) {
            Ok(outcome) => {
                info!(
                    "Session '{}' cleaned: {} -> {} rows",
                    self.source.file,
                    outcome.report.rows_before,
                    outcome.report.rows_after
                );
                Ok(&*self.cleaned.insert(outcome))
            }
            Err(e) => {
                warn!("Cleaning '{}' failed: {}", self.source.file, e);
                Err(e)
            }
        }
    }

    pub fn original_preview(&self, max_rows: usize) -> Preview {
        Preview::of(&self.original, max_rows)
    }

    pub fn cleaned_preview(&self, max_rows: usize) -> Option<Preview> {
        self.cleaned().map(|data| Preview::of(data, max_rows))
    }

    /// The cleaned dataset as CSV, or `None` before the first successful run.
    pub fn download_csv(&self) -> Result<Option<String>> {
        self.cleaned().map(to_csv_string).transpose()
    }

    /// Columns of the cleaned dataset usable for a chart of `kind`.
    pub fn chart_columns(&self, kind: ChartKind) -> Vec<&str> {
        self.cleaned()
            .map(|data| eligible_columns(data, kind))
            .unwrap_or_default()
    }

    /// Prepare chart data from the cleaned dataset, or `None` before the
    /// first successful run.
    pub fn chart(&self, request: &ChartRequest) -> Result<Option<Chart>> {
        self.cleaned()
            .map(|data| build_chart(data, request))
            .transpose()
    }
}
