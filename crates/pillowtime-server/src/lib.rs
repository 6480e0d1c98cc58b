#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod audio;
mod health;
mod request;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use pillowtime_config::{Config, ServerConfig};
use tower_http::trace::TraceLayer;

pub use audio::{AudioReply, audio_router, request_audio_from_text};
pub use request::{DirectAudioRequest, PromptRequest};
pub use state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Provider and storage clients are created here, once, and shared by
    /// every request for the life of the process.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let state = AppState::from_config(config)?;
        Ok(Self::with_state(state, &config.server))
    }

    /// Build the server around an existing state
    pub fn with_state(state: AppState, config: &ServerConfig) -> Self {
        let listen_address = config
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let mut app = Router::new();

        // Health check
        if config.health.enabled {
            app = app.route(&config.health.path, axum::routing::get(health::health_handler));
        }

        // Audio routes
        app = app.merge(audio_router().with_state(Arc::new(state)));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self { router: app, listen_address }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
