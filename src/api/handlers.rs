use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::report::{AggregationError, AnalyticsReport, ReportAggregator};

pub struct AppState {
    pub aggregator: ReportAggregator,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Handler-level failures. The client only ever sees the display text;
/// the underlying cause goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch analytics data")]
    Analytics(#[from] AggregationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Analytics(source) => {
                tracing::error!(error = %source, "Analytics aggregation failed");
            }
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Aggregate a fresh report from GA4
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let report = state.aggregator.aggregate().await?;
    Ok(Json(report))
}

/// CORS preflight; the headers come from the CORS middleware
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
