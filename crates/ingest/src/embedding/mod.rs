pub mod gemini;
pub mod ollama;
pub mod traits;

pub use gemini::GeminiEmbedder;
pub use ollama::OllamaEmbedder;
pub use traits::{Embedder, EmbeddingError};
