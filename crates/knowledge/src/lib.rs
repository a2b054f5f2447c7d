//! Retrieval and ingestion for pdfchat.
//!
//! Provides:
//! - Embedding providers (OpenAI-compatible)
//! - A pgvector-backed [`VectorStore`] sharing LangChain's table layout
//! - The [`RetrievalChain`] that answers questions from retrieved chunks
//! - PDF ingestion: load pages, split, store

pub mod bootstrap;
pub mod chunker;
pub mod embeddings;
pub mod ingest;
pub mod parser;
pub mod pgvector;
pub mod rag;
pub mod vector_store;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use bootstrap::{load_clients, Clients};
pub use chunker::SplitConfig;
pub use embeddings::{EmbeddingProvider, OpenAiEmbeddings};
pub use ingest::{ingest_pdf, IngestOptions, IngestStats};
pub use pgvector::PgVectorStore;
pub use rag::{ask_once, RetrievalChain};
pub use vector_store::VectorStore;
