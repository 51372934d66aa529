use std::path::PathBuf;

use clap::Parser;

/// Document vectorization pipeline.
///
/// Chunks a PDF or DOCX file under the selected strategy, embeds each chunk,
/// and stores one row per (chunk, vector) pair in PostgreSQL.
#[derive(Parser, Debug)]
#[command(name = "docvec", version, about = "Document vectorization pipeline")]
pub struct CliArgs {
    /// Path to the PDF or DOCX file to ingest.
    pub file_path: PathBuf,

    /// Chunking strategy: fixed, sentence, or paragraph (case-insensitive).
    #[arg(long, default_value = "fixed")]
    pub strategy: String,
}
