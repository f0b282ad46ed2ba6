//! Grade Predictor - Main Entry Point

use anyhow::Context;
use api::{init_logging, load_config, run_server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config(None).context("failed to load configuration")?;
    init_logging(&config.logging)?;

    info!("=== Grade Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Model artifact: {}", config.model.path);

    run_server(config).await
}
