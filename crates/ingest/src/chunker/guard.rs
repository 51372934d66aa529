//! Token-safety enforcement: the single point that guarantees every unit
//! handed to the embedding provider fits its input ceiling.

use super::types::{Chunk, SafeChunk};

/// Approximate token cost at roughly four characters per token.
pub fn estimated_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Clamp a normalized chunk to `max_chars` characters.
///
/// A chunk within the bound passes through unchanged as fragment 0. An
/// oversized chunk is re-split into consecutive fragments of at most
/// `max_chars` characters each (the last may be shorter), on char boundaries
/// only; concatenating the fragments in `fragment_index` order reproduces
/// the chunk text exactly. Splitting is purely length-based regardless of
/// the strategy that produced the chunk.
pub fn enforce_max_chars(chunk: Chunk, max_chars: usize) -> Vec<SafeChunk> {
    let char_count = chunk.text.chars().count();
    if char_count <= max_chars {
        return vec![SafeChunk {
            text: chunk.text,
            origin: chunk.origin,
            sequence_index: chunk.sequence_index,
            fragment_index: 0,
        }];
    }

    tracing::debug!(
        sequence_index = chunk.sequence_index,
        chars = char_count,
        estimated_tokens = estimated_tokens(&chunk.text),
        "chunk exceeds embedding ceiling, re-splitting"
    );

    let mut fragments = Vec::with_capacity(char_count.div_ceil(max_chars));
    let mut fragment = String::with_capacity(max_chars.min(chunk.text.len()));
    let mut fragment_chars = 0;

    for c in chunk.text.chars() {
        fragment.push(c);
        fragment_chars += 1;
        if fragment_chars == max_chars {
            fragments.push(SafeChunk {
                text: std::mem::take(&mut fragment),
                origin: chunk.origin,
                sequence_index: chunk.sequence_index,
                fragment_index: fragments.len(),
            });
            fragment_chars = 0;
        }
    }
    if !fragment.is_empty() {
        fragments.push(SafeChunk {
            text: fragment,
            origin: chunk.origin,
            sequence_index: chunk.sequence_index,
            fragment_index: fragments.len(),
        });
    }
    fragments
}
