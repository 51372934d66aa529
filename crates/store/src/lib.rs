//! pgvector persistence for embedded chunks.
//!
//! One row per safe chunk in the `document_embeddings` table; appends are
//! independent, with no cross-chunk transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

// ── Types ──────────────────────────────────────────

/// One persisted row: a safe chunk's text, its vector, and run metadata.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRecord {
    pub chunk_text: String,
    pub embedding: Vec<f32>,
    pub filename: String,
    /// The strategy requested for the run, not any internal fragment mechanism.
    pub strategy_split: String,
    pub created_at: DateTime<Utc>,
}

// ── Sink ───────────────────────────────────────────

/// Append-only sink for embedding records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Append one record as one row.
    async fn insert(&self, record: &EmbeddingRecord) -> Result<(), StoreError>;
}

/// Sink writing into `document_embeddings` via pgvector.
pub struct PgVectorSink {
    pool: PgPool,
}

impl PgVectorSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool and bring the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl RecordSink for PgVectorSink {
    async fn insert(&self, record: &EmbeddingRecord) -> Result<(), StoreError> {
        let embedding = Vector::from(record.embedding.clone());
        sqlx::query(
            "INSERT INTO document_embeddings (id, chunk_text, embedding, filename, strategy_split, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::new_v4())
        .bind(&record.chunk_text)
        .bind(&embedding)
        .bind(&record.filename)
        .bind(&record.strategy_split)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_construction() {
        let record = EmbeddingRecord {
            chunk_text: "Hello world".to_string(),
            embedding: vec![0.1, 0.2, 0.3],
            filename: "report.pdf".to_string(),
            strategy_split: "sentence".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(record.chunk_text, "Hello world");
        assert_eq!(record.embedding.len(), 3);
        assert_eq!(record.strategy_split, "sentence");
    }

    #[test]
    fn record_serializes() {
        let record = EmbeddingRecord {
            chunk_text: "some text".to_string(),
            embedding: vec![0.5],
            filename: "doc.docx".to_string(),
            strategy_split: "fixed".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"filename\":\"doc.docx\""));
        assert!(json.contains("\"strategy_split\":\"fixed\""));
    }
}
