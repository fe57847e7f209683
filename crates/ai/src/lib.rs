//! SMS Ledger AI - model-backed entity extraction.
//!
//! Implements `EntityExtractorTrait` from `smsledger-core` over HTTP for
//! any OpenAI-compatible chat-completions endpoint. The default settings
//! target the Hugging Face inference API.

mod client;
mod config;

pub use client::HttpEntityExtractor;
pub use config::{ExtractionConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT};
