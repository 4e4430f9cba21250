//! # Adapters
//!
//! Port implementations backing the core subsystems.

pub mod directory;
pub mod fixtures;

pub use directory::{DirectoryError, InMemoryDirectory};
pub use fixtures::{DirectoryFixtures, FixtureError};
