use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use trafficai::{ArtifactClassifier, OpenWeatherClient, Pipeline, TrafficAiConfig, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TrafficAiConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    if config.weather.api_key.is_none() {
        tracing::warn!(
            "No weather API key configured (OPENWEATHER_API_KEY); every fetch will be rejected"
        );
    }

    // A missing or corrupt model artifact is fatal; there is no degraded mode.
    let classifier = ArtifactClassifier::load(&config.model.path)
        .context("Failed to load congestion model artifact")?;
    let provider = OpenWeatherClient::new(&config.weather)?;

    let pipeline = Pipeline::new(Arc::new(provider), Arc::new(classifier), &config);
    web::run(Arc::new(pipeline), config.server.port).await
}

fn init_tracing(config: &TrafficAiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
