//! Pipeline driver: extraction → segmentation → normalization → token-safety
//! guard, then one embed-and-persist step per safe chunk.
//!
//! Per-chunk failures never abort the run; they are counted and reported in
//! the final summary. Only extraction failure is fatal.

use chrono::Utc;
use tracing::{info, warn};

use docvec_ingest::chunker::{self, ChunkConfig, SafeChunk, SplitStrategy};
use docvec_ingest::document::{self, ExtractionError};
use docvec_ingest::embedding::Embedder;
use docvec_store::{EmbeddingRecord, RecordSink};

// ── Run report ──────────────────────────────────────────────────────

/// Outcome of one ingestion run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<ChunkFailure>,
}

/// One recovered per-chunk failure.
#[derive(Debug)]
pub struct ChunkFailure {
    pub sequence_index: usize,
    pub fragment_index: usize,
    pub reason: String,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Operator-facing end-of-run summary.
    pub fn log_summary(&self) {
        info!(
            "Run complete: {} chunks attempted, {} succeeded, {} failed",
            self.attempted, self.succeeded, self.failed
        );
        for failure in &self.failures {
            warn!(
                "  chunk {}/{} failed: {}",
                failure.sequence_index, failure.fragment_index, failure.reason
            );
        }
    }
}

// ── Driver ──────────────────────────────────────────────────────────

/// Run the full pipeline for one document.
///
/// Fatal only when extraction fails; every later failure is per-chunk and
/// recorded in the returned report.
pub async fn run_document(
    bytes: &[u8],
    filename: &str,
    strategy: SplitStrategy,
    config: &ChunkConfig,
    embedder: &dyn Embedder,
    sink: &dyn RecordSink,
) -> Result<RunReport, ExtractionError> {
    info!("Extracting text from '{filename}'");
    let raw_text = document::extract_text(bytes, filename)?;

    let chunks = chunker::segment(&raw_text, strategy, config);
    info!("Created {} chunks using {} strategy", chunks.len(), strategy);

    let safe_chunks: Vec<SafeChunk> = chunks
        .into_iter()
        .map(chunker::normalize)
        .flat_map(|chunk| chunker::enforce_max_chars(chunk, config.max_chars))
        .collect();

    let total = safe_chunks.len();
    info!("{total} safe chunks after normalization and token-safety enforcement");
    let mut report = RunReport::default();

    for safe in safe_chunks {
        report.attempted += 1;
        match embed_and_persist(&safe, filename, strategy, embedder, sink).await {
            Ok(()) => {
                report.succeeded += 1;
                info!("Processed chunk {}/{}", report.attempted, total);
            }
            Err(reason) => {
                warn!(
                    sequence_index = safe.sequence_index,
                    fragment_index = safe.fragment_index,
                    %reason,
                    "chunk failed, continuing"
                );
                report.failed += 1;
                report.failures.push(ChunkFailure {
                    sequence_index: safe.sequence_index,
                    fragment_index: safe.fragment_index,
                    reason,
                });
            }
        }
    }

    Ok(report)
}

async fn embed_and_persist(
    safe: &SafeChunk,
    filename: &str,
    strategy: SplitStrategy,
    embedder: &dyn Embedder,
    sink: &dyn RecordSink,
) -> Result<(), String> {
    let vector = embedder
        .embed(&safe.text)
        .await
        .map_err(|e| format!("embedding failed: {e}"))?;

    let record = EmbeddingRecord {
        chunk_text: safe.text.clone(),
        embedding: vector,
        filename: filename.to_string(),
        strategy_split: strategy.as_str().to_string(),
        created_at: Utc::now(),
    };

    sink.insert(&record)
        .await
        .map_err(|e| format!("persistence failed: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use docvec_ingest::embedding::EmbeddingError;
    use docvec_store::StoreError;

    use super::*;

    /// Embedder that fails on one configured call, counting every call.
    struct FlakyEmbedder {
        fail_on_call: Option<usize>,
        calls: AtomicUsize,
    }

    impl FlakyEmbedder {
        fn reliable() -> Self {
            Self {
                fail_on_call: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Embedder for FlakyEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on_call == Some(call) {
                return Err(EmbeddingError::Api("simulated provider outage".to_string()));
            }
            Ok(vec![0.0, 1.0, 2.0])
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    /// In-memory sink that can fail on one configured insert attempt.
    struct MemorySink {
        records: Mutex<Vec<EmbeddingRecord>>,
        fail_on_attempt: Option<usize>,
        attempts: AtomicUsize,
    }

    impl MemorySink {
        fn reliable() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail_on_attempt: None,
                attempts: AtomicUsize::new(0),
            }
        }

        fn failing_on(attempt: usize) -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail_on_attempt: Some(attempt),
                attempts: AtomicUsize::new(0),
            }
        }

        fn records(&self) -> Vec<EmbeddingRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordSink for MemorySink {
        async fn insert(&self, record: &EmbeddingRecord) -> Result<(), StoreError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on_attempt == Some(attempt) {
                return Err(StoreError::Database(sqlx::Error::PoolClosed));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn ten_paragraphs() -> Vec<u8> {
        (1..=10)
            .map(|i| format!("Paragraph number {i} with some content.\n"))
            .collect::<String>()
            .into_bytes()
    }

    #[tokio::test]
    async fn all_chunks_succeed_on_clean_run() {
        let embedder = FlakyEmbedder::reliable();
        let sink = MemorySink::reliable();

        let report = run_document(
            &ten_paragraphs(),
            "notes.txt",
            SplitStrategy::Paragraph,
            &ChunkConfig::default(),
            &embedder,
            &sink,
        )
        .await
        .unwrap();

        assert_eq!(report.attempted, 10);
        assert_eq!(report.succeeded, 10);
        assert_eq!(report.failed, 0);
        assert!(report.is_success());
        assert_eq!(sink.records().len(), 10);
    }

    #[tokio::test]
    async fn embedding_failure_on_one_chunk_does_not_abort_the_run() {
        let embedder = FlakyEmbedder::failing_on(4);
        let sink = MemorySink::reliable();

        let report = run_document(
            &ten_paragraphs(),
            "notes.txt",
            SplitStrategy::Paragraph,
            &ChunkConfig::default(),
            &embedder,
            &sink,
        )
        .await
        .unwrap();

        assert_eq!(report.attempted, 10);
        assert_eq!(report.succeeded, 9);
        assert_eq!(report.failed, 1);
        assert!(!report.is_success());
        assert_eq!(sink.records().len(), 9);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].sequence_index, 3);
        assert!(report.failures[0].reason.contains("embedding failed"));
    }

    #[tokio::test]
    async fn persistence_failure_is_isolated_per_chunk() {
        let embedder = FlakyEmbedder::reliable();
        let sink = MemorySink::failing_on(1);

        let report = run_document(
            &ten_paragraphs(),
            "notes.txt",
            SplitStrategy::Paragraph,
            &ChunkConfig::default(),
            &embedder,
            &sink,
        )
        .await
        .unwrap();

        assert_eq!(report.succeeded, 9);
        assert_eq!(report.failed, 1);
        assert!(report.failures[0].reason.contains("persistence failed"));
        assert_eq!(sink.records().len(), 9);
    }

    #[tokio::test]
    async fn empty_document_makes_no_calls() {
        let embedder = FlakyEmbedder::reliable();
        let sink = MemorySink::reliable();

        let report = run_document(
            b"",
            "empty.txt",
            SplitStrategy::Fixed,
            &ChunkConfig::default(),
            &embedder,
            &sink,
        )
        .await
        .unwrap();

        assert_eq!(report.attempted, 0);
        assert!(report.is_success());
        assert_eq!(embedder.call_count(), 0);
        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn oversized_chunk_fragments_are_persisted_under_the_run_strategy() {
        // One pathologically long "sentence" with no terminal punctuation:
        // a single chunk that the guard must split into 6000 + 2400 chars.
        let text = "a".repeat(8400);
        let embedder = FlakyEmbedder::reliable();
        let sink = MemorySink::reliable();

        let report = run_document(
            text.as_bytes(),
            "long.txt",
            SplitStrategy::Sentence,
            &ChunkConfig::default(),
            &embedder,
            &sink,
        )
        .await
        .unwrap();

        assert_eq!(report.attempted, 2);
        assert_eq!(report.succeeded, 2);

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chunk_text.len(), 6000);
        assert_eq!(records[1].chunk_text.len(), 2400);
        for record in &records {
            assert_eq!(record.strategy_split, "sentence");
            assert_eq!(record.filename, "long.txt");
        }

        let rebuilt = format!("{}{}", records[0].chunk_text, records[1].chunk_text);
        assert_eq!(rebuilt, text);
    }

    #[tokio::test]
    async fn unsupported_file_type_is_fatal() {
        let embedder = FlakyEmbedder::reliable();
        let sink = MemorySink::reliable();

        let result = run_document(
            b"data",
            "sheet.xlsx",
            SplitStrategy::Fixed,
            &ChunkConfig::default(),
            &embedder,
            &sink,
        )
        .await;

        assert!(matches!(result, Err(ExtractionError::UnsupportedType(_))));
        assert_eq!(embedder.call_count(), 0);
    }
}
