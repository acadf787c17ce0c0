//! Minimal DOCX package: one paragraph holding one run with the tailored text.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::export::{ExportError, ExportFormat};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

pub fn render_docx(text: &str) -> Result<Vec<u8>, ExportError> {
    let document = document_xml(text);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, contents) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        ("word/document.xml", document.as_str()),
    ] {
        zip.start_file(name, options).map_err(render_error)?;
        zip.write_all(contents.as_bytes()).map_err(render_error)?;
    }

    Ok(zip.finish().map_err(render_error)?.into_inner())
}

/// Line breaks inside the run become `<w:br/>` so the text keeps its shape.
fn document_xml(text: &str) -> String {
    let run = text
        .split('\n')
        .map(|line| {
            format!(
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape(line.trim_end_matches('\r'))
            )
        })
        .collect::<Vec<_>>()
        .join("<w:br/>");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r>{run}</w:r></w:p><w:sectPr/></w:body></w:document>"#
    )
}

fn render_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Render {
        format: ExportFormat::Docx,
        reason: e.to_string(),
    }
}
