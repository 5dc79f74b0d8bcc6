use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Turns retained per session before eviction.
const DEFAULT_MEMORY_WINDOW: usize = 3;

/// Sessions untouched this long are removed by the next sweep.
const DEFAULT_MEMORY_TTL_SECS: u64 = 3600;

const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 120;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub provider: ProviderConfig,
    pub memory: MemoryConfig,
    pub fetch: FetchConfig,
}

/// Which completion backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Openai,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Chat-completions API base URL.
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    pub window: usize,
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub timeout_secs: u64,
}

impl ChatConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ChatConfig {
            common: common_config,
            provider: ProviderConfig {
                kind: match get_env("CHAT_PROVIDER", Some("openai"), is_prod)?.as_str() {
                    "mock" => ProviderKind::Mock,
                    _ => ProviderKind::Openai,
                },
                api_base: get_env(
                    "CHAT_PROVIDER_API_BASE",
                    Some(crate::services::providers::openai::OPENAI_API_BASE),
                    is_prod,
                )?,
                timeout_secs: get_env(
                    "CHAT_PROVIDER_TIMEOUT_SECS",
                    Some(&DEFAULT_COMPLETION_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_COMPLETION_TIMEOUT_SECS),
            },
            memory: MemoryConfig {
                window: get_env(
                    "CHAT_MEMORY_WINDOW",
                    Some(&DEFAULT_MEMORY_WINDOW.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_MEMORY_WINDOW),
                ttl_secs: get_env(
                    "CHAT_MEMORY_TTL_SECS",
                    Some(&DEFAULT_MEMORY_TTL_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_MEMORY_TTL_SECS),
            },
            fetch: FetchConfig {
                timeout_secs: get_env(
                    "CHAT_FETCH_TIMEOUT_SECS",
                    Some(&DEFAULT_FETCH_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
