use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction error: {0}")]
    Extraction(String),
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        let message = e.to_string();
        match e {
            PipelineError::Fetch { .. } => AppError::Fetch(message),
            PipelineError::UnknownFormat => AppError::UnknownFormat(message),
            PipelineError::UnsupportedFormat(_) => AppError::UnsupportedFormat(message),
            PipelineError::Extraction { .. } => AppError::Extraction(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Fetch(msg) => {
                tracing::warn!("Fetch error: {msg}");
                (StatusCode::BAD_GATEWAY, "FETCH_ERROR", msg.clone())
            }
            AppError::UnknownFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNKNOWN_FORMAT",
                msg.clone(),
            ),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                msg.clone(),
            ),
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    msg.clone(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_errors_map_to_app_errors() {
        let fetch = AppError::from(PipelineError::Fetch {
            url: "https://x".to_string(),
            reason: "HTTP 404 Not Found".to_string(),
        });
        assert!(matches!(fetch, AppError::Fetch(ref m) if m.contains("404")));

        let unknown = AppError::from(PipelineError::UnknownFormat);
        assert!(matches!(unknown, AppError::UnknownFormat(_)));

        let unsupported = AppError::from(PipelineError::UnsupportedFormat("image/png".into()));
        assert!(matches!(unsupported, AppError::UnsupportedFormat(ref m) if m.contains("image/png")));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Fetch("x".into()), StatusCode::BAD_GATEWAY),
            (AppError::UnknownFormat("x".into()), StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (AppError::UnsupportedFormat("x".into()), StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (AppError::Extraction("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
