//! # Authz Node Runtime
//!
//! Wires the in-memory directory into the signature verification and
//! policy matching services and serves both over HTTP.
//!
//! ## Modular Structure
//!
//! - `adapters/` - Directory store and fixture loading
//! - `container/` - Configuration and dependency wiring
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, `AUTHZ_CONFIG` file, env overrides)
//! 2. Seed the directory from fixtures, if configured
//! 3. Start the HTTP gateway
//! 4. Run until Ctrl+C, then drain in-flight requests

pub mod adapters;
pub mod container;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use authz_03_api_gateway::ApiGatewayService;
use tracing::info;

use crate::adapters::InMemoryDirectory;
use crate::container::{NodeConfig, SubsystemContainer};

/// The running authz node.
pub struct NodeRuntime {
    container: SubsystemContainer,
    gateway: ApiGatewayService,
}

impl NodeRuntime {
    /// Build the container and gateway; nothing is bound yet.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let container =
            SubsystemContainer::new(&config).context("Failed to initialize directory")?;
        let gateway = ApiGatewayService::new(
            config.gateway.clone(),
            container.verification_api(),
            container.matching_api(),
        )
        .context("Failed to create API gateway")?;

        Ok(Self { container, gateway })
    }

    /// Directory handle for administrative operations.
    pub fn directory(&self) -> Arc<InMemoryDirectory> {
        Arc::clone(&self.container.directory)
    }

    /// Start serving; returns the bound address.
    pub async fn start(&mut self) -> Result<SocketAddr> {
        info!("===========================================");
        info!("  Authz Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let addr = self
            .gateway
            .start()
            .await
            .context("Failed to start API gateway")?;
        info!(
            consumers = self.container.directory.consumers().len(),
            addr = %addr,
            "Node ready"
        );
        Ok(addr)
    }

    /// Graceful shutdown.
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Initiating graceful shutdown...");
        self.gateway
            .shutdown()
            .await
            .context("API gateway did not shut down cleanly")?;
        info!("Node shutdown complete");
        Ok(())
    }
}
