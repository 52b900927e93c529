//! Store diagnostics endpoint
//!
//! GET /test - curl-friendly view of what the backend can see of its store.

use axum::{extract::State, routing::get, Json, Router};

use crate::handlers;
use crate::models::DiagnosticsReport;
use crate::state::AppState;

/// GET /test
async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(handlers::diagnostics(state.store(), state.env()).await)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/test", get(diagnostics))
}
