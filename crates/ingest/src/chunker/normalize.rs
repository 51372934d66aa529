//! Post-segmentation whitespace cleanup.

use super::types::Chunk;

/// Normalize a chunk's text, keeping its `origin` and `sequence_index`:
/// runs of spaces/tabs collapse to one space, runs of newlines collapse to
/// one `\n`, leading/trailing whitespace is trimmed. Operates strictly after
/// segmentation has committed to boundaries — never re-merges or re-splits
/// content. Idempotent.
pub fn normalize(chunk: Chunk) -> Chunk {
    Chunk {
        text: normalize_text(&chunk.text),
        ..chunk
    }
}

fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' => {
                while matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' | '\r' => {
                while matches!(chars.peek(), Some('\n' | '\r')) {
                    chars.next();
                }
                out.push('\n');
            }
            _ => out.push(c),
        }
    }

    out.trim().to_string()
}
