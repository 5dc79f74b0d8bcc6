//! Domain models for the chat service.

pub mod message;
pub mod registry;

pub use message::{ChatMessage, Role};
pub use registry::{ModelDescriptor, ModelRegistry, DEFAULT_TEMPERATURE};
