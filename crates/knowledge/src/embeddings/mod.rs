//! Embedding providers.
//!
//! Converts text into vectors for the vector store. Used implicitly by
//! [`crate::pgvector::PgVectorStore`] for both queries and ingestion.

pub mod provider;
pub mod providers;

pub use provider::EmbeddingProvider;
pub use providers::OpenAiEmbeddings;
