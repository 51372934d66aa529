mod docx;
mod pdf;
mod txt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("DOCX extraction failed: {0}")]
    DocxError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract the raw text of a document from file bytes based on file type.
///
/// The result is a single ordered text sequence: PDF pages and DOCX
/// paragraphs each contribute one newline-terminated line, so downstream
/// paragraph segmentation can treat newline runs as paragraph breaks.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "pdf" => pdf::extract_pdf(bytes),
        "docx" => docx::extract_docx(bytes),
        "txt" | "text" => txt::extract_txt(bytes),
        other => Err(ExtractionError::UnsupportedType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let err = extract_text(b"data", "report.xlsx").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(ref t) if t == "xlsx"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(extract_text(b"plain text", "NOTES.TXT").is_ok());
    }

    #[test]
    fn filename_without_extension_is_rejected() {
        let err = extract_text(b"data", "README").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(_)));
    }
}
