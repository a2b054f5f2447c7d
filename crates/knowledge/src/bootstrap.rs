//! Client bootstrap.
//!
//! Builds the embedding client, the vector store and the chat client from an
//! [`AppConfig`]. No network traffic happens here.

use crate::embeddings::{EmbeddingProvider, OpenAiEmbeddings};
use crate::pgvector::PgVectorStore;
use crate::vector_store::VectorStore;
use pdfchat_core::{AppConfig, AppResult};
use pdfchat_llm::{LlmClient, OpenAiClient};
use std::sync::Arc;
use tracing::debug;

/// Shared client handles for one session.
#[derive(Clone)]
pub struct Clients {
    pub embeddings: Arc<dyn EmbeddingProvider>,
    pub store: Arc<dyn VectorStore>,
    pub llm: Arc<dyn LlmClient>,
}

impl std::fmt::Debug for Clients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clients")
            .field("embeddings", &self.embeddings)
            .field("llm", &self.llm.provider_name())
            .finish_non_exhaustive()
    }
}

/// Construct all clients.
///
/// Required settings are checked before anything is built, so a missing
/// `OPENAI_API_KEY`, `DATABASE_URL` or `PGVECTOR_COLLECTION` fails with
/// [`pdfchat_core::AppError::MissingSetting`] naming it.
pub fn load_clients(config: &AppConfig) -> AppResult<Clients> {
    config.validate()?;

    let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddings::with_base_url(
        &config.base_url,
        &config.api_key,
        &config.embedding_model,
    ));

    let store = PgVectorStore::connect_lazy(
        &config.database_url,
        &config.collection,
        Arc::clone(&embeddings),
        config.distance,
    )?;

    let llm = OpenAiClient::with_base_url(&config.base_url, &config.api_key);

    debug!(
        "Clients ready: embeddings={}, chat={}, collection={}, distance={}",
        config.embedding_model,
        config.chat_model,
        config.collection,
        config.distance.as_str()
    );

    Ok(Clients {
        embeddings,
        store: Arc::new(store),
        llm: Arc::new(llm),
    })
}
