//! Chat orchestration: sweep expired sessions, read history, assemble the
//! prompt, invoke completion, and persist the finished turn.

use crate::models::ModelDescriptor;
use crate::services::memory::SessionMemory;
use crate::services::prompt::PromptTemplate;
use crate::services::providers::{CompletionProvider, ProviderError};
use secrecy::SecretString;
use std::sync::Arc;

/// One chat turn to process. `session_id` is `Some` only when memory is
/// enabled for the request.
pub struct ChatTurn<'a> {
    pub model: &'a ModelDescriptor,
    pub message: &'a str,
    pub system_prompt: Option<&'a str>,
    pub temperature: f32,
    pub session_id: Option<&'a str>,
    pub credential: &'a SecretString,
}

#[derive(Clone)]
pub struct ChatService {
    memory: Arc<SessionMemory>,
    provider: Arc<dyn CompletionProvider>,
}

impl ChatService {
    pub fn new(memory: Arc<SessionMemory>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { memory, provider }
    }

    /// Generate a reply for one turn. No state is written until the
    /// completion succeeds; a failed call leaves the session untouched.
    ///
    /// Concurrent turns on the same session are not ordered relative to each
    /// other; the append step is last-writer-wins.
    pub async fn respond(&self, turn: ChatTurn<'_>) -> Result<String, ProviderError> {
        let history = match turn.session_id {
            Some(session_id) => {
                self.memory.sweep_expired();
                self.memory.history(session_id)
            }
            None => Vec::new(),
        };

        let messages =
            PromptTemplate::chat(turn.system_prompt, history, turn.message).render(turn.model);
        let temperature = turn.model.effective_temperature(turn.temperature);

        let reply = self
            .provider
            .complete(&messages, turn.model.provider_id, temperature, turn.credential)
            .await?;

        if let Some(session_id) = turn.session_id {
            self.memory.append_turn(session_id, turn.message, &reply);
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelRegistry, Role};
    use crate::services::providers::MockProvider;
    use std::time::Duration;

    fn service() -> (ChatService, Arc<SessionMemory>, Arc<MockProvider>) {
        let memory = Arc::new(SessionMemory::new(3, Duration::from_secs(3600)));
        let provider = Arc::new(MockProvider::new());
        let chat = ChatService::new(memory.clone(), provider.clone());
        (chat, memory, provider)
    }

    fn turn<'a>(
        model: &'a ModelDescriptor,
        message: &'a str,
        session_id: Option<&'a str>,
        credential: &'a SecretString,
    ) -> ChatTurn<'a> {
        ChatTurn {
            model,
            message,
            system_prompt: None,
            temperature: 0.7,
            session_id,
            credential,
        }
    }

    #[tokio::test]
    async fn memory_enabled_turns_accumulate_history() {
        let (chat, memory, provider) = service();
        let model = ModelRegistry::builtin().resolve("GPT-4o mini").unwrap();
        let credential = SecretString::new("sk-test".to_string());

        chat.respond(turn(model, "first", Some("s1"), &credential))
            .await
            .expect("first turn");
        chat.respond(turn(model, "second", Some("s1"), &credential))
            .await
            .expect("second turn");

        // The second call's prompt contains the first turn before the new
        // user message, in stored order.
        let requests = provider.requests();
        let second_prompt = &requests[1].messages;
        assert_eq!(second_prompt.len(), 3);
        assert_eq!(second_prompt[0].content, "first");
        assert_eq!(second_prompt[1].role, Role::Assistant);
        assert_eq!(second_prompt[2].content, "second");

        assert_eq!(memory.history("s1").len(), 4);
    }

    #[tokio::test]
    async fn memory_disabled_turns_skip_history_and_persistence() {
        let (chat, memory, provider) = service();
        let model = ModelRegistry::builtin().resolve("GPT-4o").unwrap();
        let credential = SecretString::new("sk-test".to_string());

        chat.respond(turn(model, "hello", None, &credential))
            .await
            .expect("turn");

        assert_eq!(provider.requests()[0].messages.len(), 1);
        assert_eq!(memory.session_count(), 0);
    }

    #[tokio::test]
    async fn reasoning_model_receives_forced_temperature() {
        let (chat, _memory, provider) = service();
        let model = ModelRegistry::builtin().resolve("o1-mini").unwrap();
        let credential = SecretString::new("sk-test".to_string());

        chat.respond(ChatTurn {
            model,
            message: "hello",
            system_prompt: Some("be brief"),
            temperature: 0.2,
            session_id: None,
            credential: &credential,
        })
        .await
        .expect("turn");

        let request = &provider.requests()[0];
        assert_eq!(request.temperature, 1.0);
        // System instruction dropped, not merged.
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "hello");
    }

    #[tokio::test]
    async fn failed_completion_writes_nothing_to_memory() {
        let (chat, memory, provider) = service();
        provider.fail_with(|| ProviderError::Timeout);
        let model = ModelRegistry::builtin().resolve("GPT-4o").unwrap();
        let credential = SecretString::new("sk-test".to_string());

        let result = chat
            .respond(turn(model, "hello", Some("s1"), &credential))
            .await;

        assert!(matches!(result, Err(ProviderError::Timeout)));
        assert!(memory.history("s1").is_empty());
    }
}
