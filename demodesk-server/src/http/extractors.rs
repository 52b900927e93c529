//! Custom Axum extractors

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{DemoRequestIn, DemoRequestPayload, ValidationError};

/// Types built from a raw JSON payload by validation
pub trait FromPayload: Sized {
    type Payload: DeserializeOwned + Send;

    fn from_payload(payload: Self::Payload) -> Result<Self, ValidationError>;
}

impl FromPayload for DemoRequestIn {
    type Payload = DemoRequestPayload;

    fn from_payload(payload: Self::Payload) -> Result<Self, ValidationError> {
        Self::try_from(payload)
    }
}

/// Extract a JSON body and validate it before the handler runs.
///
/// Rejections and validation failures both become `ApiError`, so a handler
/// taking `ValidJson<T>` only ever sees valid input.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: FromPayload,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T::Payload>::from_request(req, state).await?;
        Ok(Self(T::from_payload(payload)?))
    }
}
