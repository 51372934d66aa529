//! Segmentation strategies: fixed windows with overlap, sentence, paragraph.

use super::types::{Chunk, ChunkConfig, SplitStrategy};

/// Split raw document text into ordered chunks under the given strategy.
///
/// Empty input yields an empty sequence. Under `sentence`/`paragraph`, text
/// with no detectable boundary yields a single whole-text chunk.
pub fn segment(text: &str, strategy: SplitStrategy, config: &ChunkConfig) -> Vec<Chunk> {
    let pieces = match strategy {
        SplitStrategy::Fixed => split_fixed(text, config.window_chars, config.overlap_chars),
        SplitStrategy::Sentence => split_sentences(text),
        SplitStrategy::Paragraph => split_paragraphs(text),
    };

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, text)| Chunk {
            text,
            origin: strategy,
            sequence_index: i,
        })
        .collect()
}

// ── Fixed windows ───────────────────────────────────────────────────────────

/// Windows of `window` characters; consecutive windows share `overlap`
/// characters. The final window may be shorter. Whitespace-only windows are
/// dropped. Slicing happens on char boundaries.
fn split_fixed(text: &str, window: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || window == 0 {
        return Vec::new();
    }

    // Byte offset of every char boundary, plus end-of-text.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain([text.len()])
        .collect();
    let total_chars = boundaries.len() - 1;
    let step = window.saturating_sub(overlap).max(1);

    let mut windows = Vec::new();
    let mut start = 0;
    while start < total_chars {
        let end = (start + window).min(total_chars);
        let piece = &text[boundaries[start]..boundaries[end]];
        if !piece.trim().is_empty() {
            windows.push(piece.to_string());
        }
        start += step;
    }
    windows
}

// ── Sentences ───────────────────────────────────────────────────────────────

/// One chunk per sentence: a sentence ends at a run of terminal punctuation
/// (`.` `!` `?`) followed by whitespace or end-of-text, with the punctuation
/// kept on the sentence. Short sentences are never merged.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }
        // Extend over the whole punctuation run ("...", "?!").
        let mut end = i + c.len_utf8();
        while let Some(&(j, d)) = chars.peek() {
            if !is_terminal(d) {
                break;
            }
            end = j + d.len_utf8();
            chars.next();
        }
        // Only a run followed by whitespace (or end-of-text) ends a sentence;
        // "3.14" keeps scanning.
        let at_boundary = match chars.peek() {
            Some(&(_, d)) => d.is_whitespace(),
            None => true,
        };
        if !at_boundary {
            continue;
        }
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        while let Some(&(_, d)) = chars.peek() {
            if !d.is_whitespace() {
                break;
            }
            chars.next();
        }
        start = chars.peek().map(|&(j, _)| j).unwrap_or(text.len());
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

// ── Paragraphs ──────────────────────────────────────────────────────────────

/// One chunk per paragraph. Extractors emit one paragraph per line, so
/// paragraph breaks are newline runs; whitespace-only lines are separators.
fn split_paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}
