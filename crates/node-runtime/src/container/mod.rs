//! # Subsystem Container
//!
//! Configuration plus the wired directory and core services.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, DirectoryConfig, NodeConfig};
pub use subsystems::SubsystemContainer;
