//! Configuration for the HTTP entity extractor.

use std::time::Duration;

use smsledger_core::extraction::SamplingParams;
use smsledger_core::transactions::DEFAULT_CURRENCY_CODE;

/// Hugging Face inference endpoint for the default model.
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/meta-llama/Llama-3.2-1B-Instruct/v1/chat/completions";

pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.2-1B-Instruct";

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the extractor needs to reach the text-generation service.
///
/// Built once by the caller and handed to [`crate::HttpEntityExtractor::new`].
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub endpoint: String,
    /// Sent as a bearer token.
    pub api_key: String,
    pub model: String,
    pub sampling: SamplingParams,
    pub timeout: Duration,
    /// Currency code named in the prompt.
    pub currency_code: String,
}

impl ExtractionConfig {
    /// Default deployment settings with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            sampling: SamplingParams::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_currency_code(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = currency_code.into();
        self
    }
}
