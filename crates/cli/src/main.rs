mod cli;
mod pipeline;

use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};

use docvec_core::config::{self, Config};
use docvec_ingest::chunker::{ChunkConfig, SplitStrategy};
use docvec_ingest::embedding::{Embedder, GeminiEmbedder, OllamaEmbedder};
use docvec_store::PgVectorSink;

use crate::cli::CliArgs;
use crate::pipeline::run_document;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    config::load_dotenv();
    let args = CliArgs::parse();

    // An unrecognized strategy is fatal before any processing begins.
    let strategy = SplitStrategy::from_str(&args.strategy)?;

    let config = Config::from_env();
    config.log_summary();

    if !config.postgres.is_configured() {
        bail!("PostgreSQL is not configured (set POSTGRES_USER and POSTGRES_PASSWORD)");
    }
    if !config.embedding.is_configured() {
        bail!(
            "Embedding provider '{}' is not configured",
            config.embedding.provider
        );
    }

    let embedder: Box<dyn Embedder> = match config.embedding.provider.as_str() {
        "gemini" => Box::new(GeminiEmbedder::new(
            config
                .embedding
                .gemini_api_key
                .clone()
                .context("GEMINI_API_KEY is required for the gemini provider")?,
            config.embedding.gemini_model.clone(),
            config.embedding.dimensions,
        )),
        "ollama" => Box::new(OllamaEmbedder::new(
            config.embedding.ollama_url.clone(),
            config.embedding.ollama_model.clone(),
            config.embedding.dimensions,
        )),
        other => bail!("Unknown embedding provider: '{other}'"),
    };

    let sink = PgVectorSink::connect(
        &config.postgres.connection_string(),
        config.postgres.max_connections,
    )
    .await
    .context("failed to connect to PostgreSQL")?;

    let filename = args
        .file_path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .with_context(|| format!("invalid file path: {}", args.file_path.display()))?;

    let bytes = tokio::fs::read(&args.file_path)
        .await
        .with_context(|| format!("failed to read {}", args.file_path.display()))?;

    let chunk_config = ChunkConfig {
        window_chars: config.chunking.window_chars,
        overlap_chars: config.chunking.overlap_chars,
        max_chars: config.chunking.max_chars,
    };

    info!("Processing: {filename}");
    let report = run_document(
        &bytes,
        &filename,
        strategy,
        &chunk_config,
        embedder.as_ref(),
        &sink,
    )
    .await
    .context("text extraction failed")?;

    report.log_summary();

    if !report.is_success() {
        error!(
            "{} of {} chunks failed; see warnings above",
            report.failed, report.attempted
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
