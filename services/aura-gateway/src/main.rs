//! Aura Gateway - Main entry point.

use anyhow::Result;
use aura_common::config::Config;
use aura_common::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load_with_env()?;

    // Initialize logging
    init_logging(&config.observability.log_level, &config.observability.log_format);

    tracing::info!("Aura Gateway v{}", env!("CARGO_PKG_VERSION"));

    // Fail fast on bad settings or a missing API key
    config.validate()?;
    config.require_anthropic_key()?;

    aura_gateway::start_server(&config).await
}
