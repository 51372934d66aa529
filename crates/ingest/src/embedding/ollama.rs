use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{Embedder, EmbeddingError};

/// Embedder backed by a local Ollama instance.
pub struct OllamaEmbedder {
    client: Client,
    url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbedder {
    pub fn new(url: String, model: String, dimensions: usize) -> Self {
        Self {
            client: Client::new(),
            url,
            model,
            dimensions,
        }
    }
}

#[derive(Serialize)]
struct OllamaEmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = OllamaEmbedRequest {
            model: self.model.clone(),
            input: vec![text.to_string()],
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(format!("{status}: {body}")));
        }

        let parsed: OllamaEmbedResponse = response.json().await?;
        let vector = parsed
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::Api("empty embeddings response".to_string()))?;

        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_model_and_single_input() {
        let request = OllamaEmbedRequest {
            model: "nomic-embed-text".to_string(),
            input: vec!["chunk text".to_string()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "nomic-embed-text");
        assert_eq!(json["input"][0], "chunk text");
    }
}
