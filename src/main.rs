//! Carbonscope server entry point

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use carbonscope::config::Config;
use carbonscope::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Intensity endpoint: {} (timeout {:?})",
        config.intensity_url,
        config.intensity_timeout
    );

    server::run_server(config).await
}
