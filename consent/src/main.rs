mod config;
mod web;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let config = ServerConfig::from_env();
    info!(
        "frontend origin {} (port {})",
        config.frontend.frontend_url, config.port
    );
    web::start_web(config).await?;
    Ok(())
}
