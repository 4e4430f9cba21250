//! # Outbound Ports (Driven Ports / SPI)
//!
//! The only dependency of this subsystem is the read-only consumer lookup,
//! defined in `shared-types` so the policy matcher can share it.

pub use shared_types::{ConsumerLookup, LookupError};
