//! Extraction module - LLM request/response contract and the extractor seam.

mod extraction_errors;
mod extraction_model;
mod extraction_traits;
mod prompt;

pub use extraction_errors::ExtractionError;
pub use extraction_model::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, SamplingParams,
    TokenUsage,
};
pub use extraction_traits::EntityExtractorTrait;
pub use prompt::{build_extraction_prompt, OUTPUT_FIELDS};
