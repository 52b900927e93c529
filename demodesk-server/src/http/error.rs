//! API error types with IntoResponse
//!
//! Every error body carries a `detail` field. Validation failures list the
//! offending field; store failures pass the store's message through.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;
use crate::store::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Payload failed validation (422)
    Validation(ValidationError),

    /// Body could not be read as JSON (status chosen by axum: 400/413/415/422)
    Rejected(JsonRejection),

    /// Store write or connection failed (500, logged)
    Store(StoreError),

    /// No route matched (404)
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "detail": [{
                        "loc": ["body", e.field()],
                        "msg": e.to_string(),
                        "type": e.kind(),
                    }]
                }),
            ),
            Self::Rejected(rejection) => (
                rejection.status(),
                json!({
                    "detail": rejection.body_text()
                }),
            ),
            Self::Store(e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "detail": e.to_string()
                    }),
                )
            }
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                json!({
                    "detail": "Not Found"
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
