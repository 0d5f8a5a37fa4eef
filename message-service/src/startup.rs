//! Application startup and lifecycle management.

use crate::config::MessageConfig;
use crate::handlers;
use crate::services::generator::MessageGenerator;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use axum::http::HeaderValue;
use axum::{routing::get, Router};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: MessageGenerator,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration. The Gemini
    /// provider is constructed once here iff an API key is configured;
    /// without one the service still serves, rejecting generation
    /// requests at the handler.
    pub async fn build(config: MessageConfig) -> Result<Self, AppError> {
        let provider: Option<Arc<dyn TextProvider>> = match &config.gemini.api_key {
            Some(api_key) => {
                tracing::info!(
                    model = %config.gemini.model,
                    "Initialized Gemini text provider"
                );
                Some(Arc::new(GeminiTextProvider::new(GeminiConfig {
                    api_key: api_key.clone(),
                    model: config.gemini.model.clone(),
                })))
            }
            None => {
                tracing::warn!(
                    "GEMINI_API_KEY is not set; generation requests will be rejected"
                );
                None
            }
        };

        Self::with_provider(config, provider).await
    }

    /// Same wiring with an explicit provider. Tests use this to inject
    /// a mock.
    pub async fn with_provider(
        config: MessageConfig,
        provider: Option<Arc<dyn TextProvider>>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            generator: MessageGenerator::new(provider),
        };

        let router = Router::new()
            .route(
                "/api/generate-message",
                get(handlers::generate::generate_message),
            )
            .route("/health", get(handlers::health::health_check))
            .layer(cors_layer(&config.cors.allowed_origins))
            .with_state(state);

        // Bind the listener up front (port 0 = random port for testing).
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("HTTP server listening on port {}", self.port);
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
