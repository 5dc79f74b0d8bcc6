//! Document-processing endpoint: one-shot completion over fetched content.

use crate::models::DEFAULT_TEMPERATURE;
use crate::services::InputKind;
use crate::startup::AppState;
use axum::{extract::State, Json};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ProcessRequest {
    /// Input-type tag: "Text", "Webpage URL", "PDF URL", or "Youtube URL".
    pub input_type: String,

    #[validate(length(min = 1, message = "input must not be empty"))]
    pub input: String,

    #[validate(length(min = 1, message = "instruction must not be empty"))]
    pub instruction: String,

    pub model: String,

    pub temperature: Option<f32>,

    pub api_key: SecretString,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    /// The completion, or in-band diagnostic text explaining a fetch failure.
    pub output: String,
}

#[tracing::instrument(skip(state, request), fields(input_type = %request.input_type, model = %request.model))]
pub async fn process_document(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, AppError> {
    request.validate()?;
    super::require_credential(&request.api_key)?;

    // An unknown tag is a caller defect: fail fast, before any fetch or
    // completion call.
    let kind = InputKind::parse(&request.input_type).ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!(
            "unsupported input type: {}",
            request.input_type
        ))
    })?;

    let model = state.registry.resolve(&request.model).ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!("unknown model: {}", request.model))
    })?;

    let output = state
        .router
        .process(
            state.provider.as_ref(),
            model,
            kind,
            &request.input,
            &request.instruction,
            request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            &request.api_key,
        )
        .await;

    Ok(Json(ProcessResponse { output }))
}
