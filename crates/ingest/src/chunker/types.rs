//! Chunk configuration, strategy selector, and output types.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Fixed-strategy window width in characters (default: 500).
    pub window_chars: usize,
    /// Characters shared between consecutive fixed windows (default: 50).
    pub overlap_chars: usize,
    /// Hard per-chunk ceiling in characters (default: 6000 — stays below a
    /// 2,048-token provider limit at roughly four characters per token).
    pub max_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            window_chars: 500,
            overlap_chars: 50,
            max_chars: 6000,
        }
    }
}

// ── Strategy selector ───────────────────────────────────────────────────────

/// Segmentation strategy requested for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Fixed character windows with overlap.
    Fixed,
    /// One chunk per sentence.
    Sentence,
    /// One chunk per paragraph.
    Paragraph,
}

#[derive(Debug, Clone, Error)]
#[error("Unknown chunking strategy: '{0}'")]
pub struct UnknownStrategy(pub String);

impl SplitStrategy {
    /// The name recorded in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitStrategy::Fixed => "fixed",
            SplitStrategy::Sentence => "sentence",
            SplitStrategy::Paragraph => "paragraph",
        }
    }
}

impl FromStr for SplitStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(SplitStrategy::Fixed),
            "sentence" => Ok(SplitStrategy::Sentence),
            "paragraph" => Ok(SplitStrategy::Paragraph),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A bounded unit of document text produced by a segmentation strategy,
/// prior to safety enforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text content.
    pub text: String,
    /// The strategy that produced this chunk.
    pub origin: SplitStrategy,
    /// 0-based position within the document.
    pub sequence_index: usize,
}

/// A chunk, or an ordered fragment of an oversized chunk, guaranteed to fit
/// the embedding provider's input ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeChunk {
    /// The fragment text content.
    pub text: String,
    /// The strategy that produced the originating chunk.
    pub origin: SplitStrategy,
    /// `sequence_index` of the originating chunk.
    pub sequence_index: usize,
    /// 0-based position among the fragments of one chunk.
    pub fragment_index: usize,
}
