use std::panic::{self, AssertUnwindSafe};

use super::DocumentError;

/// Extracts the text layer of an in-memory PDF.
///
/// pdf-extract can panic on malformed streams; the panic is contained and reported as
/// `Malformed` so one bad upload cannot take the worker down.
pub fn extract(bytes: &[u8]) -> Result<String, DocumentError> {
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(DocumentError::Malformed(format!("pdf: {e}"))),
        Err(_) => Err(DocumentError::Malformed(
            "pdf: parser panicked on malformed input".to_string(),
        )),
    }
}

/// Builds a one-page PDF in memory for tests. Each line is drawn with Helvetica;
/// no lines gives a page with only vector graphics and no text layer.
#[cfg(test)]
pub(crate) fn build_pdf(lines: &[&str]) -> Vec<u8> {
    let content = if lines.is_empty() {
        "0.5 w 72 700 m 540 700 l S".to_string()
    } else {
        let shown: String = lines
            .iter()
            .map(|line| {
                let escaped = line
                    .replace('\\', "\\\\")
                    .replace('(', "\\(")
                    .replace(')', "\\)");
                format!("({escaped}) Tj 0 -16 Td ")
            })
            .collect();
        format!("BT /F1 12 Tf 72 720 Td {shown}ET")
    };

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}
