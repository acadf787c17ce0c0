//! PDF rendering: the tailored text as one 12pt Helvetica block on A4 pages.
//!
//! Lines are wrapped to the text width and flow onto a new page when the
//! current one is full. There is no section-aware pagination.

use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, TextItem,
};

use crate::export::{ExportError, ExportFormat};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const PAGE_HEIGHT_PT: f32 = 841.89;
/// Page padding plus block margin and padding.
const INSET_PT: f32 = 50.0;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_PT: f32 = 14.4;
/// Helvetica at 12pt averages roughly 6pt per glyph over 495pt of text width.
const MAX_LINE_CHARS: usize = 82;

pub fn render_pdf(text: &str) -> Result<Vec<u8>, ExportError> {
    let lines = wrap_lines(text, MAX_LINE_CHARS);
    let per_page = lines_per_page();

    let pages: Vec<PdfPage> = if lines.is_empty() {
        vec![page(&[])]
    } else {
        lines.chunks(per_page).map(page).collect()
    };

    let mut warnings = Vec::new();
    let bytes = PdfDocument::new("Tailored Resume")
        .with_pages(pages)
        .save(&PdfSaveOptions::default(), &mut warnings);

    if bytes.is_empty() {
        return Err(ExportError::Render {
            format: ExportFormat::Pdf,
            reason: format!("empty document ({} warnings)", warnings.len()),
        });
    }
    Ok(bytes)
}

pub(crate) fn lines_per_page() -> usize {
    (((PAGE_HEIGHT_PT - 2.0 * INSET_PT) / LINE_HEIGHT_PT).floor() as usize).max(1)
}

fn page(lines: &[String]) -> PdfPage {
    let mut ops = vec![
        Op::StartTextSection,
        Op::SetTextCursor {
            pos: Point {
                x: Pt(INSET_PT),
                y: Pt(PAGE_HEIGHT_PT - INSET_PT - FONT_SIZE_PT),
            },
        },
        Op::SetFontSizeBuiltinFont {
            size: Pt(FONT_SIZE_PT),
            font: BuiltinFont::Helvetica,
        },
        Op::SetLineHeight {
            lh: Pt(LINE_HEIGHT_PT),
        },
    ];
    for line in lines {
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(line.clone())],
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::AddLineBreak);
    }
    ops.push(Op::EndTextSection);

    PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops)
}

/// Greedy word wrap. Source line breaks are kept; words longer than `width`
/// are split.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for source_line in text.lines() {
        let mut current = String::new();
        for word in source_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                out.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_short_lines() {
        assert_eq!(
            wrap_lines("# Jane Doe\n\n- Rust", 80),
            vec!["# Jane Doe", "", "- Rust"]
        );
    }

    #[test]
    fn test_wrap_breaks_on_word_boundary() {
        assert_eq!(
            wrap_lines("alpha beta gamma delta", 11),
            vec!["alpha beta", "gamma delta"]
        );
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        assert_eq!(wrap_lines("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_render_pdf_produces_pdf_bytes() {
        let bytes = render_pdf("# Jane Doe\n- Rust services").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_text_flows_onto_more_pages() {
        let text = "line\n".repeat(lines_per_page() * 2 + 1);
        let bytes = render_pdf(&text).unwrap();
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 3);
    }

    #[test]
    fn test_short_text_fits_one_page() {
        let bytes = render_pdf("# Jane Doe\n- Rust").unwrap();
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 1);
    }
}
