//! PDF text extraction.
//!
//! Pages are decoded with pdf-extract. Within a page the decoder's text
//! fragments are joined with single spaces in the order reported; every page
//! is terminated by a newline. No layout reconstruction is attempted.

use crate::extract::ExtractError;

pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::Decode(e.to_string()))?;
    Ok(join_pages(&pages))
}

/// Joins per-page decoder output: `"<page1>\n<page2>\n..."`.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&join_fragments(page.as_ref()));
        text.push('\n');
    }
    text
}

fn join_fragments(page: &str) -> String {
    page.lines()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
