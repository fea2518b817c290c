//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap "current weather" endpoint. Handlers
//! only see the [`WeatherProvider`] trait so tests can substitute a stub.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{Coordinate, WeatherReading};
use thiserror::Error;

use crate::config::WeatherConfig;

/// Failure talking to the weather provider
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather API key is not configured")]
    MissingApiKey,

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else {
            WeatherError::Request(err.to_string())
        }
    }
}

/// Source of current weather conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short provider name for diagnostics
    fn name(&self) -> &str;

    /// Fetch the current reading at a location
    async fn fetch_current(
        &self,
        latitude: &Coordinate,
        longitude: &Coordinate,
    ) -> Result<WeatherReading, WeatherError>;
}

/// OpenWeatherMap API client
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    main: OWMMain,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

impl From<OWMCurrentResponse> for WeatherReading {
    fn from(data: OWMCurrentResponse) -> Self {
        WeatherReading {
            temp: data.main.temp,
            humidity: data.main.humidity,
            rainfall: data.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
        }
    }
}

impl OpenWeatherClient {
    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::with_base_url(
            config.api_key.clone(),
            config.api_endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn request_current(
        &self,
        latitude: &Coordinate,
        longitude: &Coordinate,
    ) -> Result<WeatherReading, WeatherError> {
        if !self.has_api_key() {
            return Err(WeatherError::MissingApiKey);
        }

        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[
                ("lat", latitude.query_value()),
                ("lon", longitude.query_value()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Status { status, body });
        }

        let body = response.text().await?;
        let data: OWMCurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Malformed(e.to_string()))?;

        Ok(data.into())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    fn name(&self) -> &str {
        "openweathermap"
    }

    async fn fetch_current(
        &self,
        latitude: &Coordinate,
        longitude: &Coordinate,
    ) -> Result<WeatherReading, WeatherError> {
        tracing::debug!(%latitude, %longitude, "Fetching current weather");

        let result = self.request_current(latitude, longitude).await;
        if let Err(err) = &result {
            tracing::warn!(%latitude, %longitude, error = %err, "Weather API request failed");
        }
        result
    }
}
