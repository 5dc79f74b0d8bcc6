//! Completion provider abstraction.
//!
//! One trait, one real HTTP implementation (OpenAI chat completions), one
//! mock for tests. The credential is supplied per call and never cached or
//! logged; failures are classified so callers can decide how to surface
//! them.

pub mod mock;
pub mod openai;

use crate::models::ChatMessage;
use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

pub use mock::MockProvider;
pub use openai::OpenAiProvider;

/// Classified completion failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Provider error: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// Readable text shown in place of a completion when the provider fails.
    /// The conversation display always gets *some* text, never a bare error.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::AuthenticationFailed(_) => {
                "Error: the API key was rejected. Please check that the key is valid and active."
                    .to_string()
            }
            ProviderError::RateLimited => {
                "Error: the completion service is rate-limiting requests. Please wait a moment and try again."
                    .to_string()
            }
            ProviderError::InvalidRequest(msg) => {
                format!("Error: the completion service rejected the request: {}", msg)
            }
            ProviderError::Connection(msg) => {
                format!("Error: could not reach the completion service: {}", msg)
            }
            ProviderError::Timeout => {
                "Error: the completion service did not respond in time. Please try again."
                    .to_string()
            }
            ProviderError::Unknown(msg) => {
                format!("Error: the completion service failed: {}", msg)
            }
        }
    }
}

/// A single call to the external completion service.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the assembled messages and return the generated text.
    ///
    /// `credential` authenticates this call only; implementations must not
    /// cache, log, or persist it beyond the call's lifetime.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model_id: &str,
        temperature: f32,
        credential: &SecretString,
    ) -> Result<String, ProviderError>;
}
