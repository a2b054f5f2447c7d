//! Shared document types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A unit of document text with retrieval metadata.
///
/// Metadata values are JSON scalars; the well-known keys are `page`,
/// `source` and `file_path`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content
    pub content: String,

    /// Metadata (e.g., page number, source file)
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Chunk {
    /// Create a chunk without metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Page number, if present and not null.
    pub fn page(&self) -> Option<&Value> {
        self.metadata.get("page").filter(|v| !v.is_null())
    }

    /// Source identifier: the first truthy value of `source`, then `file_path`.
    pub fn source(&self) -> Option<&Value> {
        ["source", "file_path"]
            .iter()
            .filter_map(|key| self.metadata.get(*key))
            .find(|v| is_truthy(v))
    }
}

/// A retrieved chunk paired with the score reported by the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f64,
}

impl ScoredChunk {
    pub fn new(chunk: Chunk, score: f64) -> Self {
        Self { chunk, score }
    }
}

/// Render a scalar metadata value as plain text (strings without quotes).
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a metadata value counts as present for fallback lookups.
///
/// Null, empty strings, `false` and zero are not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_prefers_source_key() {
        let chunk = Chunk::new("text")
            .with_metadata("source", "a.pdf")
            .with_metadata("file_path", "b.pdf");
        assert_eq!(chunk.source(), Some(&json!("a.pdf")));
    }

    #[test]
    fn test_source_falls_back_to_file_path() {
        let chunk = Chunk::new("text")
            .with_metadata("source", "")
            .with_metadata("file_path", "b.pdf");
        assert_eq!(chunk.source(), Some(&json!("b.pdf")));
    }

    #[test]
    fn test_page_zero_is_present() {
        let chunk = Chunk::new("text").with_metadata("page", 0);
        assert_eq!(chunk.page(), Some(&json!(0)));

        let null_page = Chunk::new("text").with_metadata("page", Value::Null);
        assert!(null_page.page().is_none());
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("relatorio.pdf")), "relatorio.pdf");
        assert_eq!(scalar_text(&json!(3)), "3");
        assert_eq!(scalar_text(&json!(true)), "true");
    }
}
