//! Command handlers for the pdfchat CLI.

pub mod ask;
pub mod chat;
pub mod ingest;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use ingest::IngestCommand;
