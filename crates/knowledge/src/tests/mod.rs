//! Shared test doubles for the knowledge crate.

use crate::vector_store::VectorStore;
use pdfchat_core::{AppError, AppResult, Chunk, ScoredChunk};
use pdfchat_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory store returning canned search results and recording writes.
#[derive(Default)]
pub struct FakeStore {
    results: Vec<ScoredChunk>,
    fail_with: Option<String>,
    pub searches: AtomicUsize,
    pub last_k: Mutex<Option<usize>>,
    pub stored: Mutex<Vec<(String, Chunk)>>,
}

impl FakeStore {
    pub fn with_results(results: Vec<ScoredChunk>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl VectorStore for FakeStore {
    async fn similarity_search(&self, _query: &str, k: usize) -> AppResult<Vec<ScoredChunk>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        *self.last_k.lock().unwrap() = Some(k);

        if let Some(message) = &self.fail_with {
            return Err(AppError::Retrieval(message.clone()));
        }

        Ok(self.results.iter().take(k).cloned().collect())
    }

    async fn add_chunks(&self, chunks: &[Chunk], ids: &[String]) -> AppResult<()> {
        if let Some(message) = &self.fail_with {
            return Err(AppError::Retrieval(message.clone()));
        }

        let mut stored = self.stored.lock().unwrap();
        for (id, chunk) in ids.iter().zip(chunks) {
            stored.retain(|(existing, _)| existing != id);
            stored.push((id.clone(), chunk.clone()));
        }
        Ok(())
    }
}

/// Chat model double returning a fixed reply and recording prompts.
pub struct FakeLlm {
    reply: Result<String, String>,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl FakeLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LlmClient for FakeLlm {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        match &self.reply {
            Ok(content) => Ok(LlmResponse {
                content: content.clone(),
                model: request.model.clone(),
                usage: LlmUsage::new(10, 5),
            }),
            Err(message) => Err(AppError::Llm(message.clone())),
        }
    }
}

/// A scored chunk with page and source metadata.
pub fn scored(content: &str, score: f64, page: u32) -> ScoredChunk {
    ScoredChunk::new(
        Chunk::new(content)
            .with_metadata("page", page)
            .with_metadata("source", "relatorio.pdf"),
        score,
    )
}

/// Write a small PDF with one text line per page.
pub fn write_sample_pdf(path: &Path, pages: &[&str]) {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    doc.save(path).unwrap();
}
