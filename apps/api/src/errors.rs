use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::document::{ExtractionError, ALLOWED_EXTENSIONS};
use crate::inference::artifacts::SchemaError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Schema mismatch: {0}")]
    Schema(#[from] SchemaError),

    #[error("Uploaded document exceeds the size limit")]
    PayloadTooLarge,

    #[error("Placement model is not loaded")]
    ModelUnavailable,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(ExtractionError::UnsupportedType(name)) => {
                tracing::warn!("Rejected upload '{name}'");
                (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "UNSUPPORTED_MEDIA_TYPE",
                    format!(
                        "Unsupported file type. Allowed extensions: {}",
                        ALLOWED_EXTENSIONS.join(", ")
                    ),
                )
            }
            AppError::Extraction(ExtractionError::Empty) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Uploaded document is empty".to_string(),
            ),
            AppError::Extraction(e @ ExtractionError::Pdf(_)) => {
                tracing::warn!("Document extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    "Could not read text from the uploaded document".to_string(),
                )
            }
            AppError::Schema(e) => {
                tracing::error!("Schema mismatch between features and model artifacts: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SCHEMA_MISMATCH",
                    "The placement model is misconfigured".to_string(),
                )
            }
            AppError::PayloadTooLarge => {
                tracing::warn!("Rejected upload over the size limit");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "PAYLOAD_TOO_LARGE",
                    "Uploaded document exceeds the size limit".to_string(),
                )
            }
            AppError::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_UNAVAILABLE",
                "The placement model has not been loaded".to_string(),
            ),
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
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Extraction(ExtractionError::UnsupportedType("a.doc".into())),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                AppError::Extraction(ExtractionError::Empty),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Extraction(ExtractionError::Pdf("bad xref".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Schema(SchemaError::UnexpectedColumn("GPA".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (AppError::ModelUnavailable, StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
