use super::ExtractionError;

pub fn extract_txt(bytes: &[u8]) -> Result<String, ExtractionError> {
    // Try UTF-8 first, fall back to lossy conversion
    let text = String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_simple_text() {
        let text = extract_txt(b"Hello, world!\nThis is a test file.").unwrap();
        assert_eq!(text, "Hello, world!\nThis is a test file.");
    }

    #[test]
    fn extract_utf8_text() {
        let text = extract_txt("Ünïcödé text with émojis 🎉".as_bytes()).unwrap();
        assert_eq!(text, "Ünïcödé text with émojis 🎉");
    }

    #[test]
    fn extract_empty_text() {
        assert_eq!(extract_txt(b"").unwrap(), "");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let text = extract_txt(&[0x66, 0x6f, 0xff, 0x6f]).unwrap();
        assert!(text.starts_with("fo"));
    }
}
