//! Configuration management for the crop advisor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROP_ prefix (CROP_WEATHER__API_KEY)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Public OpenWeatherMap API root
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Front-end files
    pub static_files: StaticConfig,

    /// Secrets not used by request handling
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key; empty means not configured
    pub api_key: String,

    /// Upper bound on a single weather request
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    /// Directory holding index.html and assets/
    pub root: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SecurityConfig {
    pub secret_key: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", DEFAULT_WEATHER_ENDPOINT)?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 5)?
            .set_default("static_files.root", "static")?;

        // Deployments of the earlier service set these unprefixed
        if let Ok(key) = std::env::var("OPENWEATHER_API_KEY") {
            builder = builder.set_default("weather.api_key", key)?;
        }
        if let Ok(secret) = std::env::var("SECRET_KEY") {
            builder = builder.set_default("security.secret_key", secret)?;
        }

        let config = builder
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            static_files: StaticConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_secs: 5,
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: "static".to_string(),
        }
    }
}
