//! Exporter: renders a generated version as a downloadable file.

pub mod docx;
pub mod handlers;
pub mod pdf;

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;
use crate::models::GeneratedVersion;
use crate::store::{lock, record_error, SharedStore};

const FILE_PREFIX: &str = "tailored_resume_";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{format} renderer failed: {reason}")]
    Render {
        format: ExportFormat,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => crate::extract::DOCX_MIME,
        }
    }

    /// `tailored_resume_<id>.<ext>`
    pub fn file_name(&self, version: &GeneratedVersion) -> String {
        format!("{FILE_PREFIX}{}.{}", version.id, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Markdown => f.write_str("Markdown"),
            ExportFormat::Pdf => f.write_str("PDF"),
            ExportFormat::Docx => f.write_str("DOCX"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(AppError::Validation(format!(
                "Unknown export format '{other}'. Use md, pdf or docx."
            ))),
        }
    }
}

/// A rendered file ready to be offered as a download.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// Renders the tailored text of `version` in `format` on the blocking pool.
pub async fn render(version: &GeneratedVersion, format: ExportFormat) -> Result<Artifact, ExportError> {
    let text = version.tailored_resume.clone();
    let bytes = match format {
        ExportFormat::Markdown => text.into_bytes(),
        ExportFormat::Pdf | ExportFormat::Docx => tokio::task::spawn_blocking(move || match format {
            ExportFormat::Pdf => pdf::render_pdf(&text),
            _ => docx::render_docx(&text),
        })
        .await
        .map_err(|e| ExportError::Render {
            format,
            reason: format!("renderer crashed: {e}"),
        })??,
    };

    Ok(Artifact {
        file_name: format.file_name(version),
        content_type: format.content_type(),
        bytes: Bytes::from(bytes),
    })
}

/// Renders the stored version `id`. Renderer failures are written to the
/// error slot like extraction and generation failures.
pub async fn export_version(
    store: &SharedStore,
    id: &str,
    format: ExportFormat,
) -> Result<Artifact, AppError> {
    let version = lock(store)
        .snapshot()
        .find_version(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Version {id} not found")))?;

    match render(&version, format).await {
        Ok(artifact) => {
            info!(
                "Exported {} ({} bytes)",
                artifact.file_name,
                artifact.bytes.len()
            );
            Ok(artifact)
        }
        Err(e) => {
            let e = AppError::from(e);
            record_error(store, &e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Action, MemoryStorage, VersionStore};

    fn version() -> GeneratedVersion {
        GeneratedVersion {
            id: "1718000001234".to_string(),
            tailored_resume: "# Jane Doe\n\n- Rust services".to_string(),
            explanation: "- Led with Rust".to_string(),
            created_at: 1_718_000_001_234,
        }
    }

    #[test]
    fn test_file_names_are_deterministic() {
        let v = version();
        assert_eq!(ExportFormat::Markdown.file_name(&v), "tailored_resume_1718000001234.md");
        assert_eq!(ExportFormat::Pdf.file_name(&v), "tailored_resume_1718000001234.pdf");
        assert_eq!(ExportFormat::Docx.file_name(&v), "tailored_resume_1718000001234.docx");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("docx".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert!("txt".parse::<ExportFormat>().is_err());
    }

    #[tokio::test]
    async fn test_markdown_is_verbatim() {
        let artifact = render(&version(), ExportFormat::Markdown).await.unwrap();
        assert_eq!(&artifact.bytes[..], version().tailored_resume.as_bytes());
        assert_eq!(artifact.content_type, "text/markdown; charset=utf-8");
    }

    #[tokio::test]
    async fn test_pdf_and_docx_produce_their_containers() {
        let pdf = render(&version(), ExportFormat::Pdf).await.unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF"));

        let docx = render(&version(), ExportFormat::Docx).await.unwrap();
        assert!(docx.bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_export_unknown_version_is_not_found() {
        let store = VersionStore::open(MemoryStorage::new()).into_shared();
        let err = export_version(&store, "nope", ExportFormat::Markdown)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_export_stored_version() {
        let mut store = VersionStore::open(MemoryStorage::new());
        store.dispatch(Action::AddGeneratedVersion(version())).unwrap();
        let store = store.into_shared();

        let artifact = export_version(&store, "1718000001234", ExportFormat::Docx)
            .await
            .unwrap();
        assert_eq!(artifact.file_name, "tailored_resume_1718000001234.docx");
        assert!(lock(&store).snapshot().draft.error.is_none());
    }
}
