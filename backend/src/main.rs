//! Crop Advisor - Backend Server

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crop_advisor_server::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing (CROP_LOG_FORMAT=json for structured output)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crop_advisor_server=debug,tower_http=debug".into());
    let json_logs = std::env::var("CROP_LOG_FORMAT").map_or(false, |v| v == "json");

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Load configuration
    let config = Config::load()?;

    tracing::info!("Starting Crop Advisor Server");
    tracing::info!("Environment: {}", config.environment);

    if config.weather.api_key.is_empty() {
        tracing::warn!(
            "Weather API key not configured; /insights will fail until CROP_WEATHER__API_KEY is set"
        );
    }

    let addr = config.bind_address();
    let state = AppState::from_config(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
