//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS (any origin, credentials allowed)
//! - Tracing middleware and a per-request timeout
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::config::ServerConfig;
use crate::state::AppState;
use crate::store::StoreHandle;

/// Build the application router with all routes
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    // Mirrors the request's origin, method and headers so credentials stay allowed
    let cors = CorsLayer::very_permissive();

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(timeout_layer(request_timeout))
        .layer(cors);

    Router::new()
        .merge(routes::root::router())
        .merge(routes::health::router())
        .merge(routes::demo_requests::router())
        .merge(routes::metrics::router())
        .merge(routes::diagnostics::router())
        .fallback(|| async { ApiError::NotFound })
        .layer(middleware)
        .with_state(state)
}

/// Requests still running after `request_timeout` get a 408
fn timeout_layer(request_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::from_env()?;
/// let store = store::connect(&config.database).await;
/// run_server(config, store).await?;
/// ```
pub async fn run_server(config: ServerConfig, store: StoreHandle) -> Result<(), ServerError> {
    tracing::info!(connected = store.is_connected(), "Store handle resolved");
    let app = build_router(AppState::new(store), config.request_timeout);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
