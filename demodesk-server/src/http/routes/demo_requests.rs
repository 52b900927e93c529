//! Demo request endpoints

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::handlers;
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::models::{DemoRequestIn, DemoRequestOut};
use crate::state::AppState;

/// POST /api/demo-requests - store a demo request
async fn create_demo_request(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<DemoRequestIn>,
) -> Result<(StatusCode, Json<DemoRequestOut>), ApiError> {
    let created = handlers::submit_demo_request(state.store(), request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Demo request routes
pub fn router() -> Router<AppState> {
    Router::new().route("/api/demo-requests", post(create_demo_request))
}
