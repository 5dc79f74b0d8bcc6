//! Conversational chat endpoint.

use crate::models::DEFAULT_TEMPERATURE;
use crate::services::ChatTurn;
use crate::startup::AppState;
use axum::{extract::State, Json};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,

    pub system_prompt: Option<String>,

    /// User-facing model label, e.g. "GPT-4o mini".
    pub model: String,

    pub temperature: Option<f32>,

    #[serde(default)]
    pub memory_enabled: bool,

    pub session_id: Option<String>,

    pub api_key: SecretString,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The completion, or readable diagnostic text when the provider failed.
    pub reply: String,

    /// Echoed (or freshly minted) session id when memory is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[tracing::instrument(skip(state, request), fields(model = %request.model, memory = request.memory_enabled))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    request.validate()?;
    super::require_credential(&request.api_key)?;

    let model = state.registry.resolve(&request.model).ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!("unknown model: {}", request.model))
    })?;

    let session_id = if request.memory_enabled {
        Some(
            request
                .session_id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        )
    } else {
        None
    };

    let turn = ChatTurn {
        model,
        message: &request.message,
        system_prompt: request.system_prompt.as_deref(),
        temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        session_id: session_id.as_deref(),
        credential: &request.api_key,
    };

    let reply = match state.chat.respond(turn).await {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(error = %error, "Chat completion failed");
            error.user_message()
        }
    };

    Ok(Json(ChatResponse { reply, session_id }))
}
