use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Pipeline-level error type. Every variant renders as the `{"error": ...}`
/// payload; none of them abort the process.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Resume parsing failed: {0}")]
    ParseFailure(String),

    #[error("Skill library file not found!")]
    MissingTaxonomy(PathBuf),

    #[error("Skill library is invalid: {0}")]
    InvalidTaxonomy(String),

    #[error("Skill extraction failed: {0}")]
    Extraction(String),

    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP error type for the upload endpoint.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, ApiError>`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Resume file exceeds the 5MB limit".to_string(),
            ),
            ApiError::Upload(msg) => {
                tracing::warn!("Upload error: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    "UPLOAD_ERROR",
                    format!("File upload error: {msg}"),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
