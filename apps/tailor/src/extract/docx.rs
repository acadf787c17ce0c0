//! DOCX → Markdown conversion.
//!
//! Best effort over `word/document.xml`: heading styles become `#` headings,
//! numbered or bulleted paragraphs become `- ` items, bold and italic runs are
//! wrapped in `**` and `_`. Tables, images and footnotes contribute their text
//! only.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::extract::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Decode(format!("not a DOCX package: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Decode(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Decode(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    document_xml_to_markdown(&xml)
}

#[derive(Default)]
struct Paragraph {
    heading: Option<usize>,
    list_item: bool,
    text: String,
}

impl Paragraph {
    fn into_markdown(self) -> Option<String> {
        let text = self.text.trim_end();
        if text.trim().is_empty() {
            return None;
        }
        let prefix = match (self.heading, self.list_item) {
            (Some(level), _) => format!("{} ", "#".repeat(level)),
            (None, true) => "- ".to_string(),
            (None, false) => String::new(),
        };
        Some(format!("{prefix}{text}"))
    }
}

#[derive(Default)]
struct Run {
    bold: bool,
    italic: bool,
    text: String,
}

impl Run {
    fn render(self) -> String {
        if self.text.trim().is_empty() {
            return self.text;
        }
        let mut out = self.text;
        if self.italic {
            out = format!("_{out}_");
        }
        if self.bold {
            out = format!("**{out}**");
        }
        out
    }
}

pub fn document_xml_to_markdown(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut blocks: Vec<String> = Vec::new();
    let mut paragraph: Option<Paragraph> = None;
    let mut run: Option<Run> = None;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| ExtractError::Decode(format!("invalid document XML: {e}")))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.name().as_ref() {
                    b"w:p" if !is_empty => paragraph = Some(Paragraph::default()),
                    b"w:pStyle" => {
                        if let (Some(p), Some(style)) = (paragraph.as_mut(), val_attr(e)) {
                            p.heading = heading_level(&style);
                        }
                    }
                    b"w:numPr" => {
                        if let Some(p) = paragraph.as_mut() {
                            p.list_item = true;
                        }
                    }
                    b"w:r" if !is_empty => run = Some(Run::default()),
                    b"w:b" => {
                        if let Some(r) = run.as_mut() {
                            r.bold = toggle_on(e);
                        }
                    }
                    b"w:i" => {
                        if let Some(r) = run.as_mut() {
                            r.italic = toggle_on(e);
                        }
                    }
                    b"w:t" if !is_empty => in_text = true,
                    b"w:tab" => push_text(&mut run, &mut paragraph, "\t"),
                    b"w:br" | b"w:cr" => push_text(&mut run, &mut paragraph, "\n"),
                    _ => {}
                }
            }
            Event::Text(ref t) if in_text => {
                let text = t
                    .decode()
                    .map_err(|e| ExtractError::Decode(format!("invalid text encoding: {e}")))?;
                push_text(&mut run, &mut paragraph, &text);
            }
            Event::GeneralRef(ref r) if in_text => {
                if let Some(c) = resolve_entity(r) {
                    push_text(&mut run, &mut paragraph, c.encode_utf8(&mut [0; 4]));
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:r" => {
                    if let (Some(r), Some(p)) = (run.take(), paragraph.as_mut()) {
                        p.text.push_str(&r.render());
                    }
                }
                b"w:p" => {
                    if let Some(p) = paragraph.take() {
                        blocks.extend(p.into_markdown());
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(blocks.join("\n\n"))
}

/// Appends text to the open run, or straight to the paragraph outside a run.
fn push_text(run: &mut Option<Run>, paragraph: &mut Option<Paragraph>, text: &str) {
    if let Some(r) = run.as_mut() {
        r.text.push_str(text);
    } else if let Some(p) = paragraph.as_mut() {
        p.text.push_str(text);
    }
}

fn val_attr(e: &BytesStart<'_>) -> Option<String> {
    e.try_get_attribute("w:val")
        .ok()
        .flatten()
        .and_then(|attr| std::str::from_utf8(&attr.value).ok().map(str::to_string))
}

/// `<w:b/>` and `<w:b w:val="true"/>` switch formatting on; `w:val="0"` or
/// `"false"` switch it off.
fn toggle_on(e: &BytesStart<'_>) -> bool {
    !matches!(val_attr(e).as_deref(), Some("0") | Some("false") | Some("off"))
}

/// "Heading1".."Heading6" map to their level, "Title" to level 1.
fn heading_level(style: &str) -> Option<usize> {
    if style.eq_ignore_ascii_case("title") {
        return Some(1);
    }
    let digits = style
        .strip_prefix("Heading")
        .or_else(|| style.strip_prefix("heading"))?;
    match digits.trim().parse::<usize>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

fn resolve_entity(r: &quick_xml::events::BytesRef<'_>) -> Option<char> {
    if let Ok(Some(c)) = r.resolve_char_ref() {
        return Some(c);
    }
    match r.decode().ok()?.as_ref() {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}
