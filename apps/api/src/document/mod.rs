//! Document Extractor: turns an uploaded resume (PDF or DOCX) into plain text.
//!
//! Extraction is best effort: a declared-supported document that fails to parse, or that has
//! no text layer (scanned images), yields an empty string. Callers decide what empty means.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod docx;
pub mod pdf;

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file format: {0}. Please upload a PDF or DOCX file.")]
    UnsupportedFormat(String),

    #[error("The uploaded file is empty. Please upload a PDF or DOCX file.")]
    EmptyFile,

    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl DocumentFormat {
    /// Resolves the format from the declared filename, then content type, then magic bytes.
    pub fn detect(
        filename: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self, DocumentError> {
        if bytes.is_empty() {
            return Err(DocumentError::EmptyFile);
        }

        if let Some(ext) = filename
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
        {
            match ext.as_str() {
                "pdf" => return Ok(DocumentFormat::Pdf),
                "docx" => return Ok(DocumentFormat::Docx),
                other => {
                    return Err(DocumentError::UnsupportedFormat(format!(".{other}")));
                }
            }
        }

        match content_type.map(|ct| ct.split(';').next().unwrap_or(ct).trim()) {
            Some("application/pdf") => return Ok(DocumentFormat::Pdf),
            Some(DOCX_CONTENT_TYPE) => return Ok(DocumentFormat::Docx),
            _ => {}
        }

        if bytes.starts_with(PDF_MAGIC) {
            Ok(DocumentFormat::Pdf)
        } else if bytes.starts_with(ZIP_MAGIC) {
            Ok(DocumentFormat::Docx)
        } else {
            Err(DocumentError::UnsupportedFormat(
                content_type.unwrap_or("unknown").to_string(),
            ))
        }
    }
}

/// Extracts and cleans the text of a document. Never fails: parse errors give "".
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> String {
    let raw = match format {
        DocumentFormat::Pdf => pdf::extract(bytes),
        DocumentFormat::Docx => docx::extract(bytes),
    };

    match raw {
        Ok(text) => {
            let cleaned = clean_text(&text);
            debug!("Extracted {} chars from {:?}", cleaned.len(), format);
            cleaned
        }
        Err(e) => {
            warn!("Text extraction failed for {:?}: {e}", format);
            String::new()
        }
    }
}

/// Collapses whitespace runs inside each line and drops blank lines.
pub fn clean_text(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\s+(?:of\s+)?(?:professional\s+|work\s+)?experience",
        r"(?i)\bexperience\s*(?:of|:)?\s*(\d{1,2})\+?\s*(?:years?|yrs?)",
        r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\s+in\s+(?:the\s+)?(?:field|industry)",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Largest "N years of experience" style claim in the text, if any.
pub fn detect_experience_years(text: &str) -> Option<u32> {
    EXPERIENCE_PATTERNS
        .iter()
        .flat_map(|re| re.captures_iter(text))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension_case_insensitive() {
        let format = DocumentFormat::detect(Some("Resume.PDF"), None, b"anything").unwrap();
        assert_eq!(format, DocumentFormat::Pdf);
        let format = DocumentFormat::detect(Some("cv.docx"), None, b"anything").unwrap();
        assert_eq!(format, DocumentFormat::Docx);
    }

    #[test]
    fn test_detect_rejects_other_extensions() {
        let err = DocumentFormat::detect(Some("resume.txt"), None, b"hello").unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(ext) if ext == ".txt"));
    }

    #[test]
    fn test_detect_by_content_type() {
        let format =
            DocumentFormat::detect(None, Some("application/pdf; charset=binary"), b"x").unwrap();
        assert_eq!(format, DocumentFormat::Pdf);
    }

    #[test]
    fn test_detect_by_magic_bytes() {
        assert_eq!(
            DocumentFormat::detect(None, None, b"%PDF-1.7 ...").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::detect(None, None, b"PK\x03\x04rest").unwrap(),
            DocumentFormat::Docx
        );
        assert!(DocumentFormat::detect(None, Some("image/png"), b"\x89PNG").is_err());
    }

    #[test]
    fn test_detect_empty_file() {
        let err = DocumentFormat::detect(Some("resume.pdf"), None, b"").unwrap_err();
        assert!(matches!(err, DocumentError::EmptyFile));
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let text = "  Skills:\t Python,   C++ \n\n\n  Node.js / CI/CD  ";
        assert_eq!(clean_text(text), "Skills: Python, C++\nNode.js / CI/CD");
    }

    #[test]
    fn test_extract_garbage_is_empty_not_error() {
        assert_eq!(extract_text(b"not a pdf at all", DocumentFormat::Pdf), "");
        assert_eq!(extract_text(b"not a zip either", DocumentFormat::Docx), "");
    }

    #[test]
    fn test_experience_years_variants() {
        assert_eq!(
            detect_experience_years("Engineer with 5+ years of experience in ML"),
            Some(5)
        );
        assert_eq!(detect_experience_years("Experience: 3 years"), Some(3));
        assert_eq!(
            detect_experience_years("2 years in the field, 7 yrs experience overall"),
            Some(7)
        );
        assert_eq!(detect_experience_years("Fresh graduate"), None);
    }
}
