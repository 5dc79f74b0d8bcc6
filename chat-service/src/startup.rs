//! Application startup and lifecycle management.

use crate::config::{ChatConfig, ProviderKind};
use crate::handlers;
use crate::models::ModelRegistry;
use crate::services::providers::{CompletionProvider, MockProvider, OpenAiProvider};
use crate::services::{ChatService, DocumentRouter, SessionMemory};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub registry: &'static ModelRegistry,
    pub provider: Arc<dyn CompletionProvider>,
    pub router: Arc<DocumentRouter>,
    pub chat: ChatService,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ChatConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn CompletionProvider> = match config.provider.kind {
            ProviderKind::Openai => Arc::new(OpenAiProvider::new(
                config.provider.api_base.clone(),
                Duration::from_secs(config.provider.timeout_secs),
            )),
            ProviderKind::Mock => Arc::new(MockProvider::new()),
        };
        tracing::info!(kind = ?config.provider.kind, "Initialized completion provider");

        let memory = Arc::new(SessionMemory::new(
            config.memory.window,
            Duration::from_secs(config.memory.ttl_secs),
        ));
        tracing::info!(
            window = config.memory.window,
            ttl_secs = config.memory.ttl_secs,
            "Initialized session memory"
        );

        let router = Arc::new(DocumentRouter::new(Duration::from_secs(
            config.fetch.timeout_secs,
        )));
        let chat = ChatService::new(memory, provider.clone());

        let state = AppState {
            registry: ModelRegistry::builtin(),
            provider,
            router,
            chat,
        };

        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, api_router(self.state)).await
    }
}

fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/v1/chat", post(handlers::chat::chat))
        .route("/v1/process", post(handlers::process::process_document))
        .route("/v1/translate", post(handlers::translate::translate))
        .route("/v1/models", get(handlers::models::list_models))
        .route("/v1/prompts", get(handlers::models::list_example_prompts))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
