//! Document Extractor: turns an uploaded resume file into plain or Markdown text.
//!
//! Only two formats are accepted; everything else is rejected before any
//! decoder runs. Decoding happens on the blocking pool.

pub mod docx;
pub mod handlers;
pub mod pdf;

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::store::{lock, record_error, Action, BusyGuard, SharedStore};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type. Please upload a PDF, DOCX, or paste text.")]
    UnsupportedType(String),

    #[error("Failed to parse file: {0}")]
    Decode(String),
}

/// The accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Maps a declared media type onto a supported format.
    pub fn from_mime(mime: &str) -> Result<Self, ExtractError> {
        // Ignore parameters such as "; charset=binary".
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            PDF_MIME => Ok(DocumentKind::Pdf),
            DOCX_MIME => Ok(DocumentKind::Docx),
            _ => Err(ExtractError::UnsupportedType(mime.to_string())),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => f.write_str("PDF"),
            DocumentKind::Docx => f.write_str("DOCX"),
        }
    }
}

/// Decodes `bytes` as `kind` on the blocking pool.
/// A decoder panic is reported as a decode failure.
pub async fn extract_text(kind: DocumentKind, bytes: Vec<u8>) -> Result<String, ExtractError> {
    debug!("Extracting {} bytes as {kind}", bytes.len());

    tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => pdf::extract_pdf(&bytes),
        DocumentKind::Docx => docx::extract_docx(&bytes),
    })
    .await
    .map_err(|e| ExtractError::Decode(format!("decoder crashed: {e}")))?
}

/// Imports an uploaded resume into the draft.
///
/// On success the draft's resume text is replaced wholesale. On failure the
/// error slot is written and the resume text is left unchanged.
pub async fn import_resume(
    store: &SharedStore,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<String, AppError> {
    let kind = match DocumentKind::from_mime(mime) {
        Ok(kind) => kind,
        Err(e) => {
            let e = AppError::from(e);
            record_error(store, &e);
            return Err(e);
        }
    };

    let _busy = BusyGuard::acquire(store)?;

    let text = match extract_text(kind, bytes).await {
        Ok(text) => text,
        Err(e) => {
            let e = AppError::from(e);
            record_error(store, &e);
            return Err(e);
        }
    };

    let persisted = lock(store).dispatch(Action::SetOriginalResume(text.clone()));
    if let Err(e) = persisted {
        let e = AppError::from(e);
        record_error(store, &e);
        return Err(e);
    }
    info!("Imported {kind} resume ({} chars)", text.len());
    Ok(text)
}
