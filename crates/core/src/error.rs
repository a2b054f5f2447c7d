//! Error types for pdfchat.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, retrieval, embedding, generation,
//! ingestion and prompt rendering.

use thiserror::Error;

/// Unified error type for pdfchat.
///
/// All library functions return `Result<T, AppError>`.
/// We never panic; errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required setting is absent (or empty)
    #[error("Configuration error: environment variable {0} is not set")]
    MissingSetting(String),

    /// Configuration-related errors (malformed values, logging setup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vector store and database errors
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Embedding provider errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Chat model (generation) errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// PDF loading and splitting errors
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Prompt rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_setting_names_variable() {
        let err = AppError::MissingSetting("DATABASE_URL".to_string());
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_from_serde_json() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
