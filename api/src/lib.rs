//! HTTP gateway for the compliance assistant.
//!
//! Routes:
//! - `GET /` health probe
//! - `POST /ask` retrieve, then answer
//! - `POST /upload` store a document in blob storage

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

mod core;
mod error_handler;
mod router;
mod routes;

pub use crate::core::{app_state::AppState, config::ApiConfig};
pub use error_handler::{AppError, UploadError};
pub use router::build_router;

/// Builds every client from the environment and serves until Ctrl+C.
///
/// # Errors
/// Missing or invalid search/completion configuration, an unusable CORS
/// origin, or a failure to bind `API_ADDRESS`.
pub async fn start() -> Result<(), AppError> {
    let cfg = ApiConfig::from_env()?;
    let state = Arc::new(AppState::from_env(&cfg)?);
    let app = build_router(state, &cfg)?;

    let listener = tokio::net::TcpListener::bind(&cfg.address)
        .await
        .map_err(|source| AppError::Bind {
            address: cfg.address.clone(),
            source,
        })?;

    info!(
        address = %cfg.address,
        storage = cfg.storage_connection_string.is_some(),
        "Compliance Bot API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            // Without a signal handler the server just keeps running.
            error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
