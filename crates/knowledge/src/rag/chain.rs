//! Retrieval-answer chain.

use crate::bootstrap::{load_clients, Clients};
use crate::vector_store::VectorStore;
use pdfchat_core::config::DEFAULT_TOP_K;
use pdfchat_core::{AppConfig, AppResult};
use pdfchat_llm::{LlmClient, LlmRequest};
use pdfchat_prompt::{build_prompt, format_context, NO_INFO_ANSWER};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Reusable handle answering questions over one vector collection.
///
/// Each call to [`RetrievalChain::answer`] performs exactly one similarity
/// search and at most one chat completion. Nothing is cached between calls.
#[derive(Clone)]
pub struct RetrievalChain {
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn LlmClient>,
    chat_model: String,
    temperature: f32,
    default_top_k: usize,
}

impl RetrievalChain {
    /// Create a chain with temperature 0 and the default top-k.
    pub fn new(
        store: Arc<dyn VectorStore>,
        llm: Arc<dyn LlmClient>,
        chat_model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            llm,
            chat_model: chat_model.into(),
            temperature: 0.0,
            default_top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    /// Build a chain from already constructed clients.
    pub fn from_clients(clients: &Clients, config: &AppConfig) -> Self {
        Self::new(
            Arc::clone(&clients.store),
            Arc::clone(&clients.llm),
            config.chat_model.clone(),
        )
        .with_temperature(config.temperature)
        .with_default_top_k(config.top_k)
    }

    /// Bootstrap the clients and build a chain in one step.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let clients = load_clients(config)?;
        Ok(Self::from_clients(&clients, config))
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Answer `question` from the `k` most similar chunks.
    ///
    /// Returns [`NO_INFO_ANSWER`] without calling the chat model when
    /// nothing is retrieved, and also when the model replies with blank text.
    #[instrument(skip(self, question), fields(model = %self.chat_model))]
    pub async fn answer(&self, question: &str, k: usize) -> AppResult<String> {
        let results = self.store.similarity_search(question, k).await?;
        debug!("Retrieved {} chunks for k={}", results.len(), k);

        let context = format_context(&results);
        if context.trim().is_empty() {
            info!("No context retrieved, refusing");
            return Ok(NO_INFO_ANSWER.to_string());
        }

        let prompt = build_prompt(&context, question)?;
        let request =
            LlmRequest::new(prompt, self.chat_model.clone()).with_temperature(self.temperature);
        let response = self.llm.complete(&request).await?;

        let answer = response.content.trim();
        if answer.is_empty() {
            info!("Model returned an empty answer, refusing");
            return Ok(NO_INFO_ANSWER.to_string());
        }

        debug!(
            "Answer ready ({} prompt tokens, {} completion tokens)",
            response.usage.prompt_tokens, response.usage.completion_tokens
        );
        Ok(answer.to_string())
    }

    /// Answer using the configured default top-k.
    pub async fn answer_default(&self, question: &str) -> AppResult<String> {
        self.answer(question, self.default_top_k).await
    }
}

/// Bootstrap the clients and answer a single question.
pub async fn ask_once(config: &AppConfig, question: &str) -> AppResult<String> {
    RetrievalChain::from_config(config)?
        .answer_default(question)
        .await
}
