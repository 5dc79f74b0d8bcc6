//! Read-only endpoints for UI consumption: the model list and example
//! document-processing instructions.

use crate::services::prompt::EXAMPLE_INSTRUCTIONS;
use crate::startup::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub label: &'static str,
    pub supports_system_message: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let models = state
        .registry
        .all()
        .iter()
        .map(|m| ModelInfo {
            label: m.label,
            supports_system_message: m.supports_system_message,
            fixed_temperature: m.fixed_temperature,
        })
        .collect();

    Json(ModelsResponse { models })
}

#[derive(Debug, Serialize)]
pub struct PromptsResponse {
    pub prompts: Vec<&'static str>,
}

pub async fn list_example_prompts() -> Json<PromptsResponse> {
    Json(PromptsResponse {
        prompts: EXAMPLE_INSTRUCTIONS.to_vec(),
    })
}
