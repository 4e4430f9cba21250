//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Entity validation errors (field bounds, malformed identifiers).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityError {
    /// A required field was empty.
    #[error("Field `{0}` must not be empty")]
    EmptyField(&'static str),

    /// A field exceeded its maximum length.
    #[error("Field `{field}` is {len} characters, maximum is {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Action token outside get/post/put/delete.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A policy must grant at least one action.
    #[error("Action set must not be empty")]
    EmptyActionSet,

    /// Resource identifier not of the form `rid:<service>:<seg0>/<seg1>`.
    #[error("Invalid resource identifier: {0}")]
    InvalidResourceId(String),
}

/// Failure of a lookup collaborator.
///
/// The core never retries or translates these; they surface to the caller
/// as opaque internal failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with an error.
    #[error("Store error: {0}")]
    Backend(String),
}
