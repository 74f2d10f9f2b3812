//! Axum route handlers for the Assessment API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::assessment::service::{assess_document, assess_text, Assessment};
use crate::errors::AppError;
use crate::extraction::document::UploadedDocument;
use crate::extraction::features::parse_resume;
use crate::models::features::FeatureRecord;
use crate::state::AppState;

/// Multipart field carrying the resume file.
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct ResumeTextRequest {
    pub resume_text: String,
}

/// POST /api/v1/assessments
///
/// Multipart upload with a `resume` file part (`.pdf` or `.txt`).
pub async fn handle_assess_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Assessment>, AppError> {
    let model = state.require_model()?;

    let mut document = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Malformed multipart body", e))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Could not read uploaded file", e))?;
        document = Some(UploadedDocument::new(file_name, data)?);
        break;
    }

    let document = document.ok_or_else(|| {
        AppError::Validation(format!("No '{RESUME_FIELD}' file part in the request"))
    })?;
    info!(
        file_name = %document.file_name,
        bytes = document.data.len(),
        "Received resume upload"
    );

    let assessment = assess_document(document, model).await?;
    Ok(Json(assessment))
}

/// Keeps the body-limit rejection distinct from a malformed request.
fn multipart_error(context: &str, error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("{context}: {error}"))
    }
}

/// POST /api/v1/assessments/text
///
/// Same pipeline for callers that already hold the resume text.
pub async fn handle_assess_text(
    State(state): State<AppState>,
    Json(request): Json<ResumeTextRequest>,
) -> Result<Json<Assessment>, AppError> {
    // Blank text is valid input and yields the default record, same as a
    // blank `.txt` upload.
    let model = state.require_model()?;
    let assessment = assess_text(&request.resume_text, &model)?;
    Ok(Json(assessment))
}

/// POST /api/v1/features
///
/// Feature extraction only. Works without a loaded model.
pub async fn handle_extract_features(
    Json(request): Json<ResumeTextRequest>,
) -> Json<FeatureRecord> {
    Json(parse_resume(&request.resume_text))
}
