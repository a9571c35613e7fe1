use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use weathergov_server::{NwsClient, ResponseCache, ServerConfig, WeatherService, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    tracing::info!(version = weathergov_server::VERSION, "starting weather tool server");

    let cache = ResponseCache::new(Duration::from_secs(config.cache.ttl_seconds));
    let client = NwsClient::new(&config.upstream, cache)?;
    let service = Arc::new(WeatherService::new(client));

    // Bind or serve failure is the only process-fatal path
    web::run(service, &config.bind_addr()).await
}
