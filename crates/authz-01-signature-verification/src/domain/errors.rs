//! # Signature Errors
//!
//! Error types for signature verification operations.

use shared_types::LookupError;
use thiserror::Error;

/// Errors that can occur during signature verification.
///
/// Every variant except [`SignatureError::Lookup`] means the request is
/// unauthenticated. The variants exist for logs; transports must not reveal
/// which one occurred.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// A required protocol parameter is absent
    #[error("Missing OAuth parameter: {0}")]
    MissingParameter(&'static str),

    /// A protocol parameter could not be parsed
    #[error("Malformed OAuth parameter: {0}")]
    MalformedParameter(&'static str),

    /// The `Authorization: OAuth ...` header could not be parsed
    #[error("Malformed OAuth Authorization header")]
    MalformedHeader,

    /// The target URL is not an absolute URL with a host
    #[error("Invalid target URL: {0}")]
    InvalidUrl(String),

    /// Signature method other than HMAC-SHA1
    #[error("Unsupported signature method: {0}")]
    UnsupportedMethod(String),

    /// Protocol version other than 1.0
    #[error("Unsupported OAuth version: {0}")]
    UnsupportedVersion(String),

    /// No consumer is registered under the supplied key
    #[error("Unknown consumer")]
    UnknownConsumer,

    /// Computed signature differs from the supplied one
    #[error("Signature verification failed")]
    VerificationFailed,

    /// The consumer lookup itself failed; not an authentication outcome
    #[error("Consumer lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

impl SignatureError {
    /// True for every failure that must surface as "not authenticated".
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, SignatureError::Lookup(_))
    }
}
