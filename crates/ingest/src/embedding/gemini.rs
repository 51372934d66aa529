use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{Embedder, EmbeddingError};

/// Embedder backed by the Gemini `embedContent` API.
pub struct GeminiEmbedder {
    client: Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl GeminiEmbedder {
    pub fn new(api_key: String, model: String, dimensions: usize) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            model,
            dimensions,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:embedContent?key={}",
            self.model, self.api_key,
        )
    }

    fn build_request_body(text: &str) -> EmbedContentRequest<'_> {
        EmbedContentRequest {
            content: Content {
                parts: vec![Part { text }],
            },
        }
    }
}

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&Self::build_request_body(text))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(format!("{status}: {body}")));
        }

        let parsed: EmbedContentResponse = response.json().await?;
        let vector = parsed.embedding.values;

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
