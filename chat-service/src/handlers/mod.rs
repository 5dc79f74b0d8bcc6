//! HTTP handlers for the chat service.

pub mod chat;
pub mod health;
pub mod models;
pub mod process;
pub mod translate;

use secrecy::{ExposeSecret, SecretString};
use service_core::error::AppError;

/// Per-request credentials are mandatory; there is no process-wide key to
/// fall back to.
fn require_credential(api_key: &SecretString) -> Result<(), AppError> {
    if api_key.expose_secret().trim().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("api_key is required")));
    }
    Ok(())
}
