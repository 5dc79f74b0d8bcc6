//! Mock provider for tests.

use super::{CompletionProvider, ProviderError};
use crate::models::{ChatMessage, Role};
use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::Mutex;

/// One recorded call, for assertions on what the invoker actually received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub model_id: String,
    pub temperature: f32,
}

/// Mock completion provider. Echoes the last user message and records every
/// call; can be primed to fail with a given classification.
#[derive(Default)]
pub struct MockProvider {
    requests: Mutex<Vec<RecordedRequest>>,
    fail_with: Mutex<Option<fn() -> ProviderError>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with the given error.
    pub fn fail_with(&self, error: fn() -> ProviderError) {
        *self.fail_with.lock().expect("mock lock") = Some(error);
    }

    /// Calls received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("mock lock").len()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model_id: &str,
        temperature: f32,
        _credential: &SecretString,
    ) -> Result<String, ProviderError> {
        self.requests.lock().expect("mock lock").push(RecordedRequest {
            messages: messages.to_vec(),
            model_id: model_id.to_string(),
            temperature,
        });

        if let Some(make_error) = *self.fail_with.lock().expect("mock lock") {
            return Err(make_error());
        }

        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        Ok(format!("Mock completion for: {}", last_user))
    }
}
