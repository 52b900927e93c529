//! Insight metrics endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::handlers;
use crate::models::MetricsOut;
use crate::state::AppState;

/// GET /api/metrics
async fn metrics(State(state): State<AppState>) -> Json<MetricsOut> {
    Json(handlers::metrics(state.store()).await)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/metrics", get(metrics))
}
