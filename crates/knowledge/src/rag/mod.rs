//! Retrieval-augmented answering.
//!
//! Retrieves the top-k chunks for a question and asks the chat model to
//! answer strictly from them.

pub mod chain;

pub use chain::{ask_once, RetrievalChain};
