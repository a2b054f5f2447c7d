//! PDF ingestion into a vector collection.

use crate::chunker::{clean_metadata, sequential_ids, split_documents, SplitConfig};
use crate::parser::load_pdf;
use crate::vector_store::VectorStore;
use pdfchat_core::{AppError, AppResult, Chunk};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Options for an ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub split: SplitConfig,
}

/// Summary of an ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestStats {
    pub pages_count: usize,
    pub chunks_count: usize,
    pub duration_secs: f64,
}

/// Chunks ready to be stored, paired with their ids by position.
#[derive(Debug, Clone)]
pub struct PreparedChunks {
    pub chunks: Vec<Chunk>,
    pub ids: Vec<String>,
    pub pages_count: usize,
}

/// Load, split and clean a PDF.
pub fn prepare_chunks(path: &Path, options: &IngestOptions) -> AppResult<PreparedChunks> {
    let pages = load_pdf(path)?;
    let splits = split_documents(&pages, &options.split)?;

    if splits.is_empty() {
        return Err(AppError::Ingestion(
            "No document splits were created from the PDF.".to_string(),
        ));
    }

    let chunks: Vec<Chunk> = splits
        .into_iter()
        .map(|chunk| Chunk {
            metadata: clean_metadata(&chunk.metadata),
            content: chunk.content,
        })
        .collect();
    let ids = sequential_ids(chunks.len());

    Ok(PreparedChunks {
        chunks,
        ids,
        pages_count: pages.len(),
    })
}

/// Ingest a PDF into `store`.
///
/// Ids are assigned by position, so re-ingesting the same file overwrites
/// the documents stored by the previous run.
pub async fn ingest_pdf(
    path: &Path,
    store: &dyn VectorStore,
    options: &IngestOptions,
) -> AppResult<IngestStats> {
    let start = Instant::now();

    tracing::info!("Ingesting {:?}", path);

    let PreparedChunks {
        chunks,
        ids,
        pages_count,
    } = prepare_chunks(path, options)?;

    tracing::info!("Created {} document splits from the PDF", chunks.len());

    store.add_chunks(&chunks, &ids).await?;

    let duration = start.elapsed();

    tracing::info!(
        "Ingestion completed: {} chunks from {} pages in {:.2}s",
        chunks.len(),
        pages_count,
        duration.as_secs_f64()
    );

    Ok(IngestStats {
        pages_count,
        chunks_count: chunks.len(),
        duration_secs: duration.as_secs_f64(),
    })
}
