use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::remote_client::RemoteError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse document: {0}")]
    Parse(String),

    #[error("Could not detect job type from resume content")]
    JobDetection,

    #[error("Remote analysis failed: {0}")]
    RemoteAnalysis(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(kind) => AppError::UnsupportedFormat(kind),
            ExtractionError::Parse(message) => AppError::Parse(message),
        }
    }
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        AppError::RemoteAnalysis(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UnsupportedFormat(kind) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file type '{kind}'. Please upload PDF, DOCX, or TXT files."),
            ),
            AppError::Parse(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PARSE_ERROR",
                format!("Failed to parse file: {msg}"),
            ),
            AppError::JobDetection => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "JOB_DETECTION_FAILED",
                self.to_string(),
            ),
            AppError::RemoteAnalysis(msg) => {
                tracing::error!("Remote analysis error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REMOTE_ANALYSIS_ERROR",
                    "The remote analysis backend is unavailable".to_string(),
                )
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_errors_map_to_taxonomy() {
        let unsupported: AppError = ExtractionError::UnsupportedFormat("image/png".into()).into();
        assert!(matches!(unsupported, AppError::UnsupportedFormat(ref k) if k == "image/png"));

        let parse: AppError = ExtractionError::Parse("bad zip".into()).into();
        assert!(matches!(parse, AppError::Parse(ref m) if m == "bad zip"));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::UnsupportedFormat("x".into()), StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (AppError::Parse("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::JobDetection, StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::RemoteAnalysis("x".into()), StatusCode::BAD_GATEWAY),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_job_detection_message() {
        assert_eq!(
            AppError::JobDetection.to_string(),
            "Could not detect job type from resume content"
        );
    }
}
