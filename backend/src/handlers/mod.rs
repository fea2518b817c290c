//! HTTP handlers for the crop advisor API

mod health;
mod insight;
mod prediction;

pub use health::*;
pub use insight::*;
pub use prediction::*;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// JSON request body where an empty body or `null` means "no fields"
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidInput(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::InvalidInput(format!("request body is not valid JSON: {}", e)))?;

        if value.is_null() {
            return Ok(JsonBody(T::default()));
        }

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| AppError::InvalidInput(e.to_string()))
    }
}
