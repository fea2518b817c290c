//! Live field insight service

use std::sync::Arc;

use shared::{derive_insights, InsightRequest, InsightResult};

use crate::error::{AppError, AppResult};
use crate::external::WeatherProvider;

/// Insight service deriving soil and irrigation metrics from live weather
#[derive(Clone)]
pub struct InsightService {
    weather: Arc<dyn WeatherProvider>,
}

impl InsightService {
    /// Create a new InsightService backed by a weather provider
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }

    /// Fetch current weather at the requested location and derive insights
    pub async fn insights(&self, request: &InsightRequest) -> AppResult<InsightResult> {
        let (latitude, longitude) = request.coordinates().ok_or(AppError::MissingCoordinates)?;

        let reading = self.weather.fetch_current(latitude, longitude).await?;
        let result = derive_insights(&reading);

        tracing::info!(
            %latitude,
            %longitude,
            provider = self.weather.name(),
            rainfall = reading.rainfall,
            irrigation = %result.irrigation.status,
            "Field insights derived"
        );

        Ok(result)
    }
}
