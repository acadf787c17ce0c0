//! Axum route handler for resume uploads.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::extract::import_resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_name: Option<String>,
    pub original_resume: String,
}

/// POST /api/v1/resume/upload
///
/// Expects one multipart file field. Its declared content type decides the
/// decoder; the extracted text replaces the draft resume.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
        .ok_or_else(|| AppError::Validation("No file was uploaded.".to_string()))?;

    let file_name = field.file_name().map(str::to_string);
    let mime = field.content_type().unwrap_or_default().to_string();
    debug!("Received upload {file_name:?} declared as '{mime}'");

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;

    let original_resume = import_resume(&state.store, &mime, bytes.to_vec()).await?;

    Ok(Json(UploadResponse {
        file_name,
        original_resume,
    }))
}
