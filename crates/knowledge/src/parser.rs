//! PDF loading and page text extraction.

use lopdf::Document;
use pdfchat_core::{AppError, AppResult, Chunk};
use std::path::Path;

/// Load a PDF as one chunk per page.
///
/// Each chunk carries `source` (the path as given), `page` (0-based index)
/// and `total_pages`. Pages whose text cannot be extracted become empty
/// chunks so page numbering stays aligned with the document.
pub fn load_pdf(path: &Path) -> AppResult<Vec<Chunk>> {
    if !path.is_file() {
        return Err(AppError::Ingestion(format!(
            "PDF file not found: {}",
            path.display()
        )));
    }

    let doc = Document::load(path)
        .map_err(|e| AppError::Ingestion(format!("Failed to load {:?}: {}", path, e)))?;

    let source = path.to_string_lossy().to_string();
    let pages = doc.get_pages();
    let total_pages = pages.len();

    let chunks = pages
        .keys()
        .enumerate()
        .map(|(index, page_number)| {
            let text = doc.extract_text(&[*page_number]).unwrap_or_else(|e| {
                tracing::warn!("Could not extract text from page {}: {}", page_number, e);
                String::new()
            });

            Chunk::new(text)
                .with_metadata("source", source.clone())
                .with_metadata("page", index)
                .with_metadata("total_pages", total_pages)
        })
        .collect::<Vec<_>>();

    tracing::debug!("Loaded {} pages from {:?}", chunks.len(), path);

    Ok(chunks)
}
