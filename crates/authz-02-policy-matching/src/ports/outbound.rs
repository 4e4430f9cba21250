//! # Outbound Ports (Driven Ports / SPI)
//!
//! Both lookups live in `shared-types`; the consumer lookup is shared with
//! the signature verification subsystem.

pub use shared_types::{ConsumerLookup, LookupError, PolicyLookup};
