//! Context block formatting.

use pdfchat_core::types::{scalar_text, ScoredChunk};

/// Format retrieved chunks into the context block given to the model.
///
/// Each entry gets a provenance header
/// `[Trecho i | score=0.0000 | page=p | src=s]` followed by its trimmed
/// content. Entries keep their input order and are separated by a blank
/// line. An empty input yields an empty string.
pub fn format_context(results: &[ScoredChunk]) -> String {
    if results.is_empty() {
        return String::new();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, scored)| {
            format!(
                "{}\n{}\n",
                format_header(i + 1, scored),
                scored.chunk.content.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_header(position: usize, scored: &ScoredChunk) -> String {
    let mut header = format!("[Trecho {} | score={:.4}", position, scored.score);

    if let Some(page) = scored.chunk.page() {
        header.push_str(&format!(" | page={}", scalar_text(page)));
    }

    if let Some(source) = scored.chunk.source() {
        header.push_str(&format!(" | src={}", scalar_text(source)));
    }

    header.push(']');
    header
}
