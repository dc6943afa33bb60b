use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ridership_core::SegmentError;
use serde_json::json;
use std::io;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to render dashboard: {0}")]
    Report(#[from] ridership_report::Error),
}

/// Errors returned to the browser as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid selection: {}", .0.body_text())]
    InvalidSelection(#[from] JsonRejection),

    #[error(transparent)]
    Segment(#[from] SegmentError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidSelection(rejection) => rejection.status(),
            ApiError::Segment(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, "request failed: {self}");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
