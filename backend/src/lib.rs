//! Crop Advisor - Backend Server
//!
//! Serves the static front-end, rule-based crop yield predictions and
//! live soil/irrigation insights derived from current weather.

use std::sync::Arc;

use axum::Router;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use external::{OpenWeatherClient, WeatherError, WeatherProvider};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(config: Config, weather: Arc<dyn WeatherProvider>) -> Self {
        Self {
            config: Arc::new(config),
            weather,
        }
    }

    /// State backed by the OpenWeatherMap client described in `config`
    pub fn from_config(config: Config) -> Result<Self, WeatherError> {
        let client = OpenWeatherClient::from_config(&config.weather)?;
        Ok(Self::new(config, Arc::new(client)))
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::static_routes(&state.config.static_files))
        .merge(routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
