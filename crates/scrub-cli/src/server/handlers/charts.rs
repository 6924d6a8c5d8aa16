//! Chart data handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use scrub::{Chart, ChartKind, ChartRequest};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Columns usable for a chart kind.
#[derive(Serialize)]
pub struct ChartColumnsResponse {
    pub kind: ChartKind,
    pub columns: Vec<String>,
}

/// GET /api/charts/:kind/columns
pub async fn chart_columns(
    State(state): State<AppState>,
    Path(kind): Path<ChartKind>,
) -> Result<Json<ChartColumnsResponse>, ApiError> {
    let session = state.session.read().await;
    let session = session.as_ref().ok_or_else(ApiError::no_upload)?;
    if session.cleaned().is_none() {
        return Err(ApiError::not_cleaned());
    }

    let columns = session
        .chart_columns(kind)
        .into_iter()
        .map(String::from)
        .collect();
    Ok(Json(ChartColumnsResponse { kind, columns }))
}

/// POST /api/charts
pub async fn build_chart(
    State(state): State<AppState>,
    Json(request): Json<ChartRequest>,
) -> Result<Json<Chart>, ApiError> {
    let session = state.session.read().await;
    let session = session.as_ref().ok_or_else(ApiError::no_upload)?;
    let chart = session.chart(&request)?.ok_or_else(ApiError::not_cleaned)?;
    Ok(Json(chart))
}
