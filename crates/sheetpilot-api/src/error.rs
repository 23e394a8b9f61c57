//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use sheetpilot_protocols::{ExtractError, TranscribeError};

/// Errors returned by the HTTP handlers.
///
/// Every variant renders as a JSON body with at least an `error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscribeError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    /// The fill session aborted. `screenshot` is the diagnostic snapshot URL.
    #[error("Timesheet fill failed: {message}")]
    FillFailed {
        message: String,
        screenshot: Option<String>,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Transcription(TranscribeError::EmptyAudio) => StatusCode::BAD_REQUEST,
            ApiError::Transcription(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Extraction(ExtractError::EmptyInput) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(ExtractError::MalformedResponse { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Extraction(_) => StatusCode::BAD_GATEWAY,
            ApiError::FillFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        }

        let body = match &self {
            ApiError::FillFailed { screenshot, .. } => json!({
                "error": self.to_string(),
                "status": "failed",
                "screenshot": screenshot,
            }),
            ApiError::Extraction(ExtractError::MalformedResponse { raw, .. }) => json!({
                "error": self.to_string(),
                "raw_response": raw,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
