//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::SignedRequest;
use crate::domain::errors::SignatureError;
use shared_types::ConsumerIdentity;

/// Primary Signature Verification API.
///
/// Implementations must be thread-safe (`Send + Sync`) and stateless
/// between calls.
#[async_trait::async_trait]
pub trait SignatureVerificationApi: Send + Sync {
    /// Verify that `request` was signed with the secret of the consumer it
    /// names.
    ///
    /// # Errors
    /// * Any unauthenticated variant of [`SignatureError`] - missing or
    ///   malformed parameters, unsupported method, unknown consumer,
    ///   signature mismatch
    /// * [`SignatureError::Lookup`] - the consumer store failed
    async fn verify(&self, request: &SignedRequest) -> Result<ConsumerIdentity, SignatureError>;
}
