//! Cleaning handlers.

use axum::{extract::State, Json};
use scrub::{CleaningOptions, CleaningReport, Preview};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// The cleaned data and how it was produced.
#[derive(Serialize)]
pub struct CleanedResponse {
    pub report: CleaningReport,
    pub preview: Preview,
}

/// POST /api/clean
///
/// Runs the enabled stages over the uploaded dataset. A failed run keeps
/// the previous cleaned result.
pub async fn clean(
    State(state): State<AppState>,
    Json(options): Json<CleaningOptions>,
) -> Result<Json<CleanedResponse>, ApiError> {
    let mut session = state.session.write().await;
    let session = session.as_mut().ok_or_else(ApiError::no_upload)?;

    let outcome = state.scrub.clean_session(session, &options)?;
    Ok(Json(CleanedResponse {
        report: outcome.report.clone(),
        preview: Preview::of(&outcome.dataset, state.preview_rows()),
    }))
}

/// GET /api/cleaned
pub async fn get_cleaned(
    State(state): State<AppState>,
) -> Result<Json<CleanedResponse>, ApiError> {
    let session = state.session.read().await;
    let session = session.as_ref().ok_or_else(ApiError::no_upload)?;

    match (session.report(), session.cleaned_preview(state.preview_rows())) {
        (Some(report), Some(preview)) => Ok(Json(CleanedResponse {
            report: report.clone(),
            preview,
        })),
        _ => Err(ApiError::not_cleaned()),
    }
}
