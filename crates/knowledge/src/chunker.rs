//! Page splitting with configurable size and overlap.

use pdfchat_core::types::is_truthy;
use pdfchat_core::{AppError, AppResult, Chunk};
use serde_json::{Map, Value};
use text_splitter::{ChunkConfig, TextSplitter};

/// Default chunk capacity in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between neighbouring chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 150;

/// Character-based splitting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl SplitConfig {
    fn splitter(&self) -> AppResult<TextSplitter<text_splitter::Characters>> {
        let config = ChunkConfig::new(self.chunk_size)
            .with_overlap(self.chunk_overlap)
            .map_err(|e| {
                AppError::Config(format!(
                    "Invalid split settings (size {}, overlap {}): {}",
                    self.chunk_size, self.chunk_overlap, e
                ))
            })?;
        Ok(TextSplitter::new(config))
    }
}

/// Split page documents into chunks.
///
/// Every chunk inherits the metadata of the page it came from. Blank
/// pages produce no chunks.
pub fn split_documents(documents: &[Chunk], config: &SplitConfig) -> AppResult<Vec<Chunk>> {
    let splitter = config.splitter()?;

    let chunks: Vec<Chunk> = documents
        .iter()
        .flat_map(|doc| {
            splitter
                .chunks(&doc.content)
                .filter(|text| !text.trim().is_empty())
                .map(|text| Chunk {
                    content: text.to_string(),
                    metadata: doc.metadata.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    tracing::debug!(
        "Split {} documents into {} chunks (size: {}, overlap: {})",
        documents.len(),
        chunks.len(),
        config.chunk_size,
        config.chunk_overlap
    );

    Ok(chunks)
}

/// Drop metadata entries that are null or empty strings.
pub fn clean_metadata(metadata: &Map<String, Value>) -> Map<String, Value> {
    metadata
        .iter()
        .filter(|(_, value)| match value {
            Value::Null | Value::String(_) => is_truthy(value),
            _ => true,
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Sequential document ids: `doc-0`, `doc-1`, ...
pub fn sequential_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("doc-{}", i)).collect()
}
