//! # Domain Layer
//!
//! Pure matching logic with no I/O dependencies.

pub mod candidates;
pub mod decision;
