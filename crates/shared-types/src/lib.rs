//! # Shared Types Crate
//!
//! This crate contains the consumer and policy entities, the read-only lookup
//! ports both core subsystems depend on, and the explicit update contracts
//! used by the administrative side of the directory.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Consumer`, `Policy`, `Action` and
//!   `ResourceId` are defined here and nowhere else.
//! - **Read-Only Core**: The lookup ports expose queries only. Writes go
//!   through the typed update contracts in [`updates`].
//! - **Injected Stores**: Subsystems receive lookups as trait objects; there
//!   is no global store handle.

pub mod credentials;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod updates;

pub use credentials::{generate_key, generate_secret};
pub use entities::*;
pub use errors::*;
pub use ports::{ConsumerLookup, PolicyLookup};
pub use updates::{ConsumerUpdate, NewConsumer, PolicyUpdate};
