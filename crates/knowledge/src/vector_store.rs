//! Vector store abstraction for document chunks.
//!
//! A store is bound to one named collection and owns the embedding of
//! queries and documents.

use pdfchat_core::{AppResult, Chunk, ScoredChunk};

/// Trait for vector store backends.
#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    /// Search for the `k` chunks most similar to `query`.
    ///
    /// Results are ordered by relevance as decided by the backend; callers
    /// must not re-rank them.
    async fn similarity_search(&self, query: &str, k: usize) -> AppResult<Vec<ScoredChunk>>;

    /// Insert or replace chunks under the given identifiers.
    ///
    /// `ids` and `chunks` are matched by position.
    async fn add_chunks(&self, chunks: &[Chunk], ids: &[String]) -> AppResult<()>;
}
