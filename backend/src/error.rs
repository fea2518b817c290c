//! Error handling for the crop advisor
//!
//! Every error is rendered as `{"error": "<message>"}` with a matching status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::external::WeatherError;

/// Message clients rely on when coordinates are missing
pub const MISSING_COORDINATES_MESSAGE: &str = "Latitude and longitude required";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{}", MISSING_COORDINATES_MESSAGE)]
    MissingCoordinates,

    // External service errors
    #[error("Weather provider unavailable: {0}")]
    UpstreamUnavailable(WeatherError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::MissingApiKey => AppError::Configuration(err.to_string()),
            other => AppError::UpstreamUnavailable(other),
        }
    }
}

impl From<shared::InputError> for AppError {
    fn from(err: shared::InputError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::MissingCoordinates => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable(WeatherError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    pub fn public_message(&self) -> String {
        match self {
            AppError::UpstreamUnavailable(WeatherError::Timeout) => {
                "Weather provider timed out".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
