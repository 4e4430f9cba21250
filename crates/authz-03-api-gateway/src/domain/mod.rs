//! Domain layer: configuration, errors and target request reconstruction.

pub mod config;
pub mod error;
pub mod target;
