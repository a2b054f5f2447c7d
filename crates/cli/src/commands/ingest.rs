//! Ingest command handler.
//!
//! Loads a PDF, splits it and stores the chunks in the configured collection.

use clap::Args;
use pdfchat_core::{config::AppConfig, AppResult};
use pdfchat_knowledge::chunker::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use pdfchat_knowledge::{ingest_pdf, load_clients, IngestOptions, SplitConfig};
use std::path::PathBuf;

/// Load a PDF into the vector collection
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// PDF file to ingest (overrides PDF_PATH)
    #[arg(long)]
    pub pdf: Option<PathBuf>,

    /// Maximum characters per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Characters shared by neighbouring chunks
    #[arg(long, default_value_t = DEFAULT_CHUNK_OVERLAP)]
    pub chunk_overlap: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestCommand {
    /// Execute the ingest command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ingest command");

        let path = config.require_pdf_path()?;
        let clients = load_clients(config)?;

        let options = IngestOptions {
            split: SplitConfig {
                chunk_size: self.chunk_size,
                chunk_overlap: self.chunk_overlap,
            },
        };

        let stats = ingest_pdf(path, clients.store.as_ref(), &options).await?;

        if self.json {
            let output = serde_json::json!({
                "pdf": path.display().to_string(),
                "collection": config.collection,
                "pagesCount": stats.pages_count,
                "chunksCount": stats.chunks_count,
                "durationSecs": stats.duration_secs,
            });

            let json = serde_json::to_string_pretty(&output)?;
            println!("{}", json);
        } else {
            println!(
                "Created {} document splits from the PDF.",
                stats.chunks_count
            );
            println!(
                "Stored {} chunks from {} pages in collection '{}' ({:.2}s)",
                stats.chunks_count, stats.pages_count, config.collection, stats.duration_secs
            );
        }

        Ok(())
    }
}
