use async_trait::async_trait;

use super::{ChatCompletionResponse, ExtractionError};

/// Producer of raw model output for one notification.
///
/// Implementations make exactly one round trip per call; retries are a
/// caller policy.
#[async_trait]
pub trait EntityExtractorTrait: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &str;

    /// Sends `message` to the text-generation service and returns its
    /// response envelope untouched.
    async fn extract(&self, message: &str) -> Result<ChatCompletionResponse, ExtractionError>;
}
