//! Model registry: user-facing labels mapped to provider identifiers plus
//! per-model capability flags.
//!
//! Capability handling is data-driven: the prompt assembler consults
//! `supports_system_message` and `fixed_temperature` uniformly instead of
//! special-casing model names at call sites.

use once_cell::sync::Lazy;

/// Temperature used when the caller does not request one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Static description of one selectable model.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    /// User-facing label, e.g. "GPT-4o mini".
    pub label: &'static str,

    /// Provider-side model identifier, e.g. "gpt-4o-mini".
    pub provider_id: &'static str,

    /// Whether the model accepts a system message. Reasoning models do not;
    /// for those the system instruction is silently dropped.
    pub supports_system_message: bool,

    /// Some models only accept one temperature. When set, the caller's
    /// requested value is ignored, not rejected.
    pub fixed_temperature: Option<f32>,
}

impl ModelDescriptor {
    /// The temperature actually sent to the provider.
    pub fn effective_temperature(&self, requested: f32) -> f32 {
        self.fixed_temperature.unwrap_or(requested)
    }
}

const fn chat_model(label: &'static str, provider_id: &'static str) -> ModelDescriptor {
    ModelDescriptor {
        label,
        provider_id,
        supports_system_message: true,
        fixed_temperature: None,
    }
}

const fn reasoning_model(label: &'static str, provider_id: &'static str) -> ModelDescriptor {
    ModelDescriptor {
        label,
        provider_id,
        supports_system_message: false,
        fixed_temperature: Some(1.0),
    }
}

static BUILTIN: Lazy<ModelRegistry> = Lazy::new(|| ModelRegistry {
    models: vec![
        chat_model("GPT-4o", "gpt-4o"),
        chat_model("GPT-4o mini", "gpt-4o-mini"),
        reasoning_model("o1", "o1"),
        reasoning_model("o1-mini", "o1-mini"),
        reasoning_model("o1-preview", "o1-preview"),
        chat_model("GPT-4 Turbo", "gpt-4-turbo"),
        chat_model("GPT-4", "gpt-4"),
    ],
});

/// Lookup table from user-facing labels to model descriptors. Loaded once at
/// startup; no state beyond the static table.
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    /// The built-in registry of supported models.
    pub fn builtin() -> &'static ModelRegistry {
        &BUILTIN
    }

    /// Resolve a user-facing label to its descriptor.
    pub fn resolve(&self, label: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.label == label)
    }

    /// All registered models, in display order.
    pub fn all(&self) -> &[ModelDescriptor] {
        &self.models
    }
}
