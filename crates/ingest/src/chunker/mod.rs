//! Chunk-production and token-safety engine.
//!
//! Splits raw document text into ordered chunks under a caller-selected
//! strategy (fixed windows with overlap, sentence, paragraph), normalizes
//! whitespace per chunk, and re-splits anything that would exceed the
//! embedding provider's input ceiling.

mod guard;
mod normalize;
mod strategies;
mod types;

pub use guard::{enforce_max_chars, estimated_tokens};
pub use normalize::normalize;
pub use strategies::segment;
pub use types::{Chunk, ChunkConfig, SafeChunk, SplitStrategy, UnknownStrategy};
