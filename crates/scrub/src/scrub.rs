//! Main Scrub struct and public API.

use std::path::Path;

use tracing::info;

use crate::clean::{CleaningOptions, CleaningOutcome, Pipeline, PipelineConfig};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::input::{Parser, ParserConfig};
use crate::output::DEFAULT_PREVIEW_ROWS;
use crate::session::CleaningSession;

/// Configuration for loading and cleaning data.
#[derive(Debug, Clone)]
pub struct ScrubConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Pipeline configuration.
    pub pipeline: PipelineConfig,
    /// Rows shown in previews.
    pub preview_rows: usize,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            pipeline: PipelineConfig::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// Loads CSV data into sessions and cleans it.
pub struct Scrub {
    config: ScrubConfig,
    parser: Parser,
    pipeline: Pipeline,
}

impl Scrub {
    /// Create a Scrub instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(ScrubConfig::default())
    }

    /// Create a Scrub instance with custom configuration.
    pub fn with_config(config: ScrubConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let pipeline = Pipeline::with_config(config.pipeline.clone());

        Self {
            config,
            parser,
            pipeline,
        }
    }

    pub fn config(&self) -> &ScrubConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Load a CSV file into a new session.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<CleaningSession> {
        let (data, source) = self.parser.parse_file(path)?;
        info!(
            "Loaded '{}': {} rows x {} columns",
            source.file, source.row_count, source.column_count
        );
        Ok(CleaningSession::new(data, source))
    }

    /// Load uploaded CSV bytes into a new session.
    pub fn load_upload(&self, name: &str, contents: &[u8]) -> Result<CleaningSession> {
        let (data, source) = self.parser.parse_upload(name, contents)?;
        info!(
            "Received '{}': {} rows x {} columns",
            source.file, source.row_count, source.column_count
        );
        Ok(CleaningSession::new(data, source))
    }

    /// Clean a dataset without a session.
    pub fn clean(&self, data: &Dataset, options: &CleaningOptions) -> Result<CleaningOutcome> {
        self.pipeline.run(data, options)
    }

    /// Run the pipeline over a session's original dataset.
    pub fn clean_session<'a>(
        &self,
        session: &'a mut CleaningSession,
        options: &CleaningOptions,
    ) -> Result<&'a CleaningOutcome> {
        session.clean(&self.pipeline, options)
    }
}

impl Default for Scrub {
    fn default() -> Self {
        Self::new()
    }
}
