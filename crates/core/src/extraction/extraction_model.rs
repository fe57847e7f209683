//! Wire types for the chat-completions style text-generation service.

use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Request body sent to the text-generation endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub stream: bool,
    pub temperature: f32,
    pub top_p: f32,
}

/// Sampling settings applied to every extraction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 700,
            temperature: 0.1,
            top_p: 0.9,
        }
    }
}

impl ChatCompletionRequest {
    /// Builds a non-streaming request carrying a single system prompt.
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        sampling: SamplingParams,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(prompt)],
            max_tokens: sampling.max_tokens,
            stream: false,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Response envelope. Only `choices[0].message.content` is consumed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl ChatCompletionResponse {
    /// Returns the text of the first choice.
    pub fn first_content(&self) -> Result<&str, ExtractionError> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| ExtractionError::malformed("response contains no choices"))
    }
}
