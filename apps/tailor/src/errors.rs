use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::extract::ExtractError;
use crate::generation::GenerationError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The `Display` text is the human-readable message written to the store's
/// error slot.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("A request is already in progress. Wait for it to finish.")]
    Busy,

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// The single string rendered in the error slot.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Busy => (StatusCode::CONFLICT, "BUSY"),
            AppError::Extraction(ExtractError::UnsupportedType(_)) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FILE_TYPE")
            }
            AppError::Extraction(_) => (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_ERROR"),
            AppError::Generation(GenerationError::InvalidStructure) => {
                (StatusCode::BAD_GATEWAY, "INVALID_STRUCTURE")
            }
            AppError::Generation(_) => (StatusCode::BAD_GATEWAY, "GENERATION_ERROR"),
            AppError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Store(e) => {
                tracing::error!("Storage error: {e}");
                "A storage error occurred".to_string()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!("{other}");
                }
                other.user_message()
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
