//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::handlers;
use crate::models::HealthStatus;
use crate::state::AppState;

/// GET /api/health
async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(handlers::health(state.store()))
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}
