//! pdfchat Core Library
//!
//! This crate provides the foundational utilities for pdfchat:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - Shared document types (`Chunk`, `ScoredChunk`)

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, DistanceStrategy};
pub use error::{AppError, AppResult};
pub use types::{Chunk, ScoredChunk};
