//! Chat-completions client used as the model extraction path.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use smsledger_core::extraction::{
    build_extraction_prompt, ChatCompletionRequest, ChatCompletionResponse,
    EntityExtractorTrait, ExtractionError,
};

use crate::config::ExtractionConfig;

/// Extractor ID constant
const EXTRACTOR_ID: &str = "CHAT_COMPLETIONS";

/// Sends one notification per request to an OpenAI-compatible
/// chat-completions endpoint.
///
/// # Example
///
/// ```ignore
/// use smsledger_ai::{ExtractionConfig, HttpEntityExtractor};
///
/// let extractor = HttpEntityExtractor::new(ExtractionConfig::new("hf_xxx"));
/// let response = extractor.extract("Payment received for GHS 5.00").await?;
/// ```
pub struct HttpEntityExtractor {
    client: Client,
    config: ExtractionConfig,
}

impl HttpEntityExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn build_request(&self, message: &str) -> ChatCompletionRequest {
        let prompt = build_extraction_prompt(message, &self.config.currency_code);
        ChatCompletionRequest::new(self.config.model.as_str(), prompt, self.config.sampling)
    }

    fn map_send_error(&self, err: reqwest::Error) -> ExtractionError {
        if err.is_timeout() {
            ExtractionError::timeout(self.config.timeout)
        } else {
            ExtractionError::transport(err.to_string())
        }
    }
}

#[async_trait]
impl EntityExtractorTrait for HttpEntityExtractor {
    fn id(&self) -> &str {
        EXTRACTOR_ID
    }

    async fn extract(&self, message: &str) -> Result<ChatCompletionResponse, ExtractionError> {
        if self.config.api_key.trim().is_empty() {
            return Err(ExtractionError::NotConfigured(
                "no API key for the extraction endpoint".to_string(),
            ));
        }

        let request = self.build_request(message);
        debug!(
            "Requesting extraction from {} with model {}",
            self.config.endpoint, self.config.model
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            warn!("Extraction endpoint returned {}: {}", status, body);
            return Err(ExtractionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<ChatCompletionResponse>(&body)
            .map_err(|e| ExtractionError::malformed(e.to_string()))
    }
}
