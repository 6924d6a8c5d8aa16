//! Upload, preview and download handlers.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use scrub::{Preview, SourceMetadata, DOWNLOAD_FILE_NAME};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Query parameters for an upload.
#[derive(Deserialize)]
pub struct UploadParams {
    /// Display name for the uploaded file.
    pub name: Option<String>,
}

/// Response after an upload.
#[derive(Serialize)]
pub struct UploadResponse {
    pub source: SourceMetadata,
    pub preview: Preview,
}

/// POST /api/upload
///
/// Replaces the current session with the uploaded CSV.
pub async fn upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Upload body is empty".to_string()));
    }

    let name = params.name.unwrap_or_else(|| "upload.csv".to_string());
    let session = state.scrub.load_upload(&name, &body)?;
    info!("Uploaded '{}' ({} bytes)", name, body.len());

    let response = UploadResponse {
        source: session.source().clone(),
        preview: session.original_preview(state.preview_rows()),
    };
    *state.session.write().await = Some(session);

    Ok(Json(response))
}

/// GET /api/original
pub async fn get_original(State(state): State<AppState>) -> Result<Json<Preview>, ApiError> {
    let session = state.session.read().await;
    let session = session.as_ref().ok_or_else(ApiError::no_upload)?;
    Ok(Json(session.original_preview(state.preview_rows())))
}

/// GET /api/download
///
/// The cleaned dataset as a CSV attachment.
pub async fn download(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let session = state.session.read().await;
    let session = session.as_ref().ok_or_else(ApiError::no_upload)?;
    let csv = session.download_csv()?.ok_or_else(ApiError::not_cleaned)?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
        ),
    ];
    Ok((headers, csv))
}
