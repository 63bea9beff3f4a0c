//! Server Implementation
//!
//! HTTP server startup with graceful ctrl-c shutdown

use crate::api;
use crate::core::{AppState, Config};
use shared::error::{AppError, AppResult};

/// HTTP Server
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    pub fn with_state(config: Config, state: AppState) -> Self {
        Self { config, state }
    }

    pub async fn run(self) -> AppResult<()> {
        let app = api::create_router(self.state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        tracing::info!("oryx-server listening on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        Ok(())
    }
}
