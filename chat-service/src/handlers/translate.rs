//! Translation endpoint: one-shot chat completion with a generated
//! translator instruction.

use crate::models::DEFAULT_TEMPERATURE;
use crate::services::prompt::translation_instruction;
use crate::services::ChatTurn;
use crate::startup::AppState;
use axum::{extract::State, Json};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct TranslateRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,

    #[validate(length(min = 1, message = "target_language must not be empty"))]
    pub target_language: String,

    pub model: String,

    pub temperature: Option<f32>,

    pub api_key: SecretString,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translated: String,
}

#[tracing::instrument(skip(state, request), fields(target = %request.target_language, model = %request.model))]
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    request.validate()?;
    super::require_credential(&request.api_key)?;

    let model = state.registry.resolve(&request.model).ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!("unknown model: {}", request.model))
    })?;

    let instruction = translation_instruction(&request.target_language);
    let turn = ChatTurn {
        model,
        message: &request.text,
        system_prompt: Some(&instruction),
        temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        session_id: None,
        credential: &request.api_key,
    };

    let translated = match state.chat.respond(turn).await {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(error = %error, "Translation completion failed");
            error.user_message()
        }
    };

    Ok(Json(TranslateResponse { translated }))
}
