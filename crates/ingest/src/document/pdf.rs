use super::ExtractionError;

pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    // pdf-extract returns all text as one string.
    // Split on form feed characters (\x0C) which typically separate pages,
    // then rejoin so each page contributes one newline-terminated block.
    let pages: Vec<&str> = text
        .split('\x0C')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut out = String::with_capacity(text.len());
    for page in pages {
        out.push_str(page);
        out.push('\n');
    }
    Ok(out)
}
