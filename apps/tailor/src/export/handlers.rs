//! Axum route handler for downloads.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::export::{export_version, ExportFormat};
use crate::state::AppState;

/// GET /api/v1/versions/:id/export/:format
///
/// `format` is one of `md`, `pdf`, `docx`. Served as an attachment named
/// `tailored_resume_<id>.<ext>`.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, format)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let format: ExportFormat = format.parse()?;
    let artifact = export_version(&state.store, &id, format).await?;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}
