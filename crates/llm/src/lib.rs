//! Chat-model integration crate for pdfchat.
//!
//! This crate provides a provider-agnostic abstraction for single-turn
//! completions, with an OpenAI-compatible implementation.
//!
//! # Example
//! ```no_run
//! use pdfchat_llm::{LlmClient, LlmRequest, providers::OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...");
//! let request = LlmRequest::new("Olá!", "gpt-4o-mini").with_temperature(0.0);
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use providers::OpenAiClient;
