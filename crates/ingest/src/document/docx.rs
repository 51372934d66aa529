use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractionError;

/// A .docx file is a zip archive; the body text lives in `word/document.xml`.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::DocxError(e.to_string()))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::DocxError(format!("missing word/document.xml: {e}")))?
        .read_to_string(&mut document_xml)?;

    plaintext_from_document_xml(&document_xml)
}

/// Collect the text runs (`w:t`) of each paragraph (`w:p`) into one
/// newline-terminated line per paragraph.
fn plaintext_from_document_xml(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut paragraph = String::new();
    let mut in_text_run = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractionError::DocxError(e.to_string()))?;
        match event {
            Event::Start(ref e) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_run = true;
                }
            }
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"tab" => paragraph.push('\t'),
                b"br" => paragraph.push(' '),
                _ => {}
            },
            Event::Text(ref e) => {
                if in_text_run {
                    let text = e
                        .unescape()
                        .map_err(|err| ExtractionError::DocxError(err.to_string()))?;
                    paragraph.push_str(&text);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => {
                    if !paragraph.trim().is_empty() {
                        out.push_str(&paragraph);
                        out.push('\n');
                    }
                    paragraph.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
