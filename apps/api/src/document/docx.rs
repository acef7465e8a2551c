use std::io::{Cursor, Read};

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::DocumentError;

const BODY_PART: &str = "word/document.xml";

/// Upper bound on the decompressed size of `word/document.xml`.
pub const MAX_BODY_XML_BYTES: u64 = 16 * 1024 * 1024;

/// Extracts the body text of a DOCX package.
pub fn extract(bytes: &[u8]) -> Result<String, DocumentError> {
    extract_with_limit(bytes, MAX_BODY_XML_BYTES)
}

fn extract_with_limit(bytes: &[u8], limit: u64) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::Malformed(format!("docx container: {e}")))?;

    let body = archive
        .by_name(BODY_PART)
        .map_err(|e| DocumentError::Malformed(format!("docx missing {BODY_PART}: {e}")))?;

    // Declared sizes can lie, so the read itself is bounded.
    let mut raw = Vec::new();
    body.take(limit + 1)
        .read_to_end(&mut raw)
        .map_err(|e| DocumentError::Malformed(format!("docx body: {e}")))?;
    if raw.len() as u64 > limit {
        return Err(DocumentError::Malformed(format!(
            "docx body exceeds {limit} bytes when decompressed"
        )));
    }
    let xml = String::from_utf8(raw)
        .map_err(|e| DocumentError::Malformed(format!("docx body: {e}")))?;

    body_text(&xml)
}

/// Walks WordprocessingML and collects run text. Paragraphs end with a newline.
fn body_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DocumentError::Malformed(format!("docx xml: {e}")))?;

        match event {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_run = true;
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                let text = t
                    .decode()
                    .map_err(|e| DocumentError::Malformed(format!("docx text: {e}")))?;
                out.push_str(&text);
            }
            Event::GeneralRef(r) if in_text_run => {
                if let Ok(Some(ch)) = r.resolve_char_ref() {
                    out.push(ch);
                } else {
                    let name = r
                        .decode()
                        .map_err(|e| DocumentError::Malformed(format!("docx entity: {e}")))?;
                    if let Some(resolved) = resolve_predefined_entity(&name) {
                        out.push_str(resolved);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

/// Builds a minimal DOCX package in memory for tests.
#[cfg(test)]
pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect();
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(BODY_PART, SimpleFileOptions::default())
        .unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_become_lines() {
        let bytes = build_docx(&["Jane Doe", "Proficient in Python, SQL, and Docker"]);
        let text = extract(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\nProficient in Python, SQL, and Docker\n");
    }

    #[test]
    fn test_entities_are_resolved() {
        let bytes = build_docx(&["R&amp;D &lt;lead&gt; &#8211; C&#43;&#43;"]);
        let text = extract(&bytes).unwrap();
        assert_eq!(text, "R&D <lead> \u{2013} C++\n");
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = "<w:document xmlns:w=\"w\"><w:body><w:p><w:r><w:t>A</w:t><w:tab/>\
                   <w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p></w:body></w:document>";
        assert_eq!(body_text(xml).unwrap(), "A\tB\nC\n");
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        let xml = "<w:document xmlns:w=\"w\"><w:body><w:p><w:instrText>TOC</w:instrText>\
                   <w:r><w:t>Visible</w:t></w:r></w:p></w:body></w:document>";
        assert_eq!(body_text(xml).unwrap(), "Visible\n");
    }

    #[test]
    fn test_zip_without_body_is_malformed() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(extract(&bytes), Err(DocumentError::Malformed(_))));
    }

    #[test]
    fn test_oversized_body_is_rejected() {
        let paragraph = "Python ".repeat(10_000);
        let bytes = build_docx(&[paragraph.as_str()]);

        let err = extract_with_limit(&bytes, 16 * 1024).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(ref msg) if msg.contains("exceeds")));

        let text = extract_with_limit(&bytes, 1024 * 1024).unwrap();
        assert!(text.starts_with("Python Python"));
    }

    #[test]
    fn test_image_only_document_is_empty() {
        let bytes = build_docx(&[]);
        assert_eq!(extract(&bytes).unwrap(), "");
    }
}
