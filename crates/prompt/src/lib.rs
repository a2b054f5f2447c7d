//! Prompt system for pdfchat.
//!
//! This crate turns retrieved chunks into a grounded prompt:
//! - Context block formatting with per-chunk provenance headers
//! - Handlebars rendering of the fixed answer template
//! - The refusal string shared by the whole pipeline

pub mod builder;
pub mod context;
pub mod template;

// Re-export main items
pub use builder::build_prompt;
pub use context::format_context;
pub use template::NO_INFO_ANSWER;
