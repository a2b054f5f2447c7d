//! Configuration management for pdfchat.
//!
//! Settings are read once from the process environment (or from any lookup
//! function, which keeps tests free of global state) into an explicit
//! [`AppConfig`] value. Required settings are validated eagerly; nothing
//! downstream re-reads the environment.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// API key for the embedding and chat provider.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// PostgreSQL connection string for the vector store.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
/// Name of the vector-store collection.
pub const ENV_COLLECTION: &str = "PGVECTOR_COLLECTION";
pub const ENV_EMBEDDING_MODEL: &str = "OPENAI_EMBEDDING_MODEL";
pub const ENV_CHAT_MODEL: &str = "OPENAI_CHAT_MODEL";
pub const ENV_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_TOP_K: &str = "TOPK";
pub const ENV_PDF_PATH: &str = "PDF_PATH";
pub const ENV_DISTANCE: &str = "PGVECTOR_DISTANCE";

/// Settings without which no client can be built, in the order they are checked.
pub const REQUIRED_SETTINGS: [&str; 3] = [ENV_API_KEY, ENV_DATABASE_URL, ENV_COLLECTION];

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Distance operator used by the vector store to rank chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceStrategy {
    #[default]
    Cosine,
    Euclidean,
    InnerProduct,
}

impl DistanceStrategy {
    /// Canonical setting value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
            Self::InnerProduct => "inner_product",
        }
    }
}

impl FromStr for DistanceStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "inner_product" | "inner-product" | "ip" => Ok(Self::InnerProduct),
            other => Err(AppError::Config(format!(
                "Unknown distance strategy: {}. Supported: cosine, euclidean, inner_product",
                other
            ))),
        }
    }
}

/// Main application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// API key for the OpenAI-compatible provider
    pub api_key: String,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Vector-store collection name
    pub collection: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Chat model identifier
    pub chat_model: String,

    /// Sampling temperature for the chat model
    pub temperature: f32,

    /// Default number of chunks to retrieve
    pub top_k: usize,

    /// PDF to ingest (only needed by `ingest`)
    pub pdf_path: Option<PathBuf>,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Distance operator for similarity search
    pub distance: DistanceStrategy,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("database_url", &"<redacted>")
            .field("collection", &self.collection)
            .field("embedding_model", &self.embedding_model)
            .field("chat_model", &self.chat_model)
            .field("temperature", &self.temperature)
            .field("top_k", &self.top_k)
            .field("pdf_path", &self.pdf_path)
            .field("base_url", &self.base_url)
            .field("distance", &self.distance)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Example
    /// ```no_run
    /// use pdfchat_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Collection: {}", config.collection);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Fails with [`AppError::MissingSetting`] naming the first required
    /// variable that is absent or empty.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for name in REQUIRED_SETTINGS {
            if get(name).is_none() {
                return Err(AppError::MissingSetting(name.to_string()));
            }
        }

        let temperature = match get(ENV_TEMPERATURE) {
            Some(raw) => raw.trim().parse::<f32>().map_err(|e| {
                AppError::Config(format!("Invalid {} '{}': {}", ENV_TEMPERATURE, raw, e))
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        let top_k = match get(ENV_TOP_K) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", ENV_TOP_K, raw, e)))?,
            None => DEFAULT_TOP_K,
        };

        let distance = match get(ENV_DISTANCE) {
            Some(raw) => raw.parse()?,
            None => DistanceStrategy::default(),
        };

        let config = Self {
            api_key: get(ENV_API_KEY).unwrap_or_default(),
            database_url: get(ENV_DATABASE_URL).unwrap_or_default(),
            collection: get(ENV_COLLECTION).unwrap_or_default(),
            embedding_model: get(ENV_EMBEDDING_MODEL)
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chat_model: get(ENV_CHAT_MODEL).unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            temperature,
            top_k,
            pdf_path: get(ENV_PDF_PATH).map(PathBuf::from),
            base_url: get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            distance,
            log_level: get("RUST_LOG"),
            verbose: false,
            no_color: lookup("NO_COLOR").is_some(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        top_k: Option<usize>,
        chat_model: Option<String>,
        temperature: Option<f32>,
        pdf_path: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(top_k) = top_k {
            self.top_k = top_k;
        }

        if let Some(chat_model) = chat_model {
            self.chat_model = chat_model;
        }

        if let Some(temperature) = temperature {
            self.temperature = temperature;
        }

        if let Some(pdf_path) = pdf_path {
            self.pdf_path = Some(pdf_path);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate the configuration.
    ///
    /// Required settings are checked in [`REQUIRED_SETTINGS`] order.
    pub fn validate(&self) -> AppResult<()> {
        let required = [
            (ENV_API_KEY, &self.api_key),
            (ENV_DATABASE_URL, &self.database_url),
            (ENV_COLLECTION, &self.collection),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::MissingSetting(name.to_string()));
            }
        }

        if self.top_k == 0 {
            return Err(AppError::Config(format!(
                "{} must be a positive integer",
                ENV_TOP_K
            )));
        }

        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(AppError::Config(format!(
                "{} must be a non-negative number, got {}",
                ENV_TEMPERATURE, self.temperature
            )));
        }

        Ok(())
    }

    /// Resolve the PDF path for ingestion.
    pub fn require_pdf_path(&self) -> AppResult<&PathBuf> {
        self.pdf_path
            .as_ref()
            .ok_or_else(|| AppError::MissingSetting(ENV_PDF_PATH.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required() -> HashMap<String, String> {
        env(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_DATABASE_URL, "postgres://localhost/rag"),
            (ENV_COLLECTION, "docs"),
        ])
    }

    fn load(vars: &HashMap<String, String>) -> AppResult<AppConfig> {
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&required()).unwrap();
        assert_eq!(config.embedding_model, "text-embedding-3-small");
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.distance, DistanceStrategy::Cosine);
        assert!(config.pdf_path.is_none());
    }

    #[test]
    fn test_missing_required_setting_is_named() {
        for name in REQUIRED_SETTINGS {
            let mut vars = required();
            vars.remove(name);
            match load(&vars) {
                Err(AppError::MissingSetting(missing)) => assert_eq!(missing, name),
                other => panic!("Expected missing {}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_empty_required_setting_counts_as_missing() {
        let mut vars = required();
        vars.insert(ENV_COLLECTION.to_string(), "  ".to_string());
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains(ENV_COLLECTION));
    }

    #[test]
    fn test_first_missing_setting_wins() {
        let err = load(&HashMap::new()).unwrap_err();
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_optional_settings() {
        let mut vars = required();
        vars.extend(env(&[
            (ENV_CHAT_MODEL, "gpt-4o"),
            (ENV_EMBEDDING_MODEL, "text-embedding-3-large"),
            (ENV_TEMPERATURE, "0.2"),
            (ENV_TOP_K, "4"),
            (ENV_PDF_PATH, "document.pdf"),
            (ENV_DISTANCE, "euclidean"),
        ]));

        let config = load(&vars).unwrap();
        assert_eq!(config.chat_model, "gpt-4o");
        assert_eq!(config.embedding_model, "text-embedding-3-large");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.top_k, 4);
        assert_eq!(config.pdf_path, Some(PathBuf::from("document.pdf")));
        assert_eq!(config.distance, DistanceStrategy::Euclidean);
    }

    #[test]
    fn test_invalid_temperature() {
        let mut vars = required();
        vars.insert(ENV_TEMPERATURE.to_string(), "warm".to_string());
        assert!(matches!(load(&vars), Err(AppError::Config(_))));
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let mut vars = required();
        vars.insert(ENV_TOP_K.to_string(), "0".to_string());
        assert!(matches!(load(&vars), Err(AppError::Config(_))));
    }

    #[test]
    fn test_with_overrides() {
        let config = load(&required()).unwrap().with_overrides(
            Some(3),
            Some("gpt-4.1-mini".to_string()),
            Some(0.5),
            None,
            None,
            true,
            false,
        );

        assert_eq!(config.top_k, 3);
        assert_eq!(config.chat_model, "gpt-4.1-mini");
        assert_eq!(config.temperature, 0.5);
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_require_pdf_path() {
        let config = load(&required()).unwrap();
        match config.require_pdf_path() {
            Err(AppError::MissingSetting(name)) => assert_eq!(name, ENV_PDF_PATH),
            other => panic!("Expected missing PDF_PATH, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&required()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-test"));
        assert!(!debug.contains("postgres://"));
    }

    #[test]
    fn test_distance_parsing() {
        assert_eq!("cosine".parse::<DistanceStrategy>().unwrap(), DistanceStrategy::Cosine);
        assert_eq!("IP".parse::<DistanceStrategy>().unwrap(), DistanceStrategy::InnerProduct);
        assert!("manhattan".parse::<DistanceStrategy>().is_err());
    }
}
