//! Errors raised while calling the external text-generation service.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single extraction round trip.
///
/// The extractor never substitutes default fields; every failure is
/// surfaced here with its cause so the caller can decide on a fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// No extraction endpoint or credentials are configured.
    #[error("Extraction service is not configured: {0}")]
    NotConfigured(String),

    /// The request could not be built or sent, or the connection dropped.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service did not answer within the deadline.
    #[error("Extraction timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// The service answered with a non-success status code.
    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected chat-completion envelope.
    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),
}

impl ExtractionError {
    pub fn timeout(deadline: Duration) -> Self {
        Self::Timeout {
            millis: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedEnvelope(msg.into())
    }

    /// Transport failures, timeouts, throttling and server-side errors may
    /// succeed on a later attempt. Client errors and bad envelopes will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::NotConfigured(_) | Self::MalformedEnvelope(_) => false,
        }
    }
}
