//! # Authz Node
//!
//! Binary entry point. Configuration comes from `AUTHZ_CONFIG`,
//! `AUTHZ_HOST`, `AUTHZ_PORT` and `AUTHZ_FIXTURES`; log filtering from
//! `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use node_runtime::container::NodeConfig;
use node_runtime::NodeRuntime;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::from_env().context("Invalid configuration")?;

    let mut runtime = NodeRuntime::new(config)?;
    runtime.start().await?;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await
}
