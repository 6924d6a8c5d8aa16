//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::RwLock;

use scrub::{CleaningSession, Scrub};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The uploaded dataset and its last cleaned result, if any.
    pub session: Arc<RwLock<Option<CleaningSession>>>,
    /// Parser and pipeline configuration.
    pub scrub: Arc<Scrub>,
}

impl AppState {
    /// Create new application state.
    pub fn new(scrub: Scrub, session: Option<CleaningSession>) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            scrub: Arc::new(scrub),
        }
    }

    /// Rows shown in previews.
    pub fn preview_rows(&self) -> usize {
        self.scrub.config().preview_rows
    }
}
