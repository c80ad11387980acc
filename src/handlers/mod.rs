//! HTTP handlers, one module per content area.
//!
//! Handlers stay thin: they validate the payload, call the repository or
//! storage service from `AppState`, and map the outcome to a response.
//! Whether a handler is public or admin-only is decided by the router it is
//! mounted on (see `routes`).

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub mod certificates;
pub mod content;
pub mod projects;
pub mod session;
pub mod skills;
pub mod uploads;
pub mod visitors;

/// JsonBody
///
/// `Json<T>` whose rejection is an `AppError`, so malformed bodies are
/// answered with the same `{"message": ...}` shape as every other error.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
