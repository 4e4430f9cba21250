//! # Signature Verification Service
//!
//! Application service layer that implements the `SignatureVerificationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SignatureVerificationApi`)
//! - Uses the outbound port (`ConsumerLookup`) to resolve the signing consumer
//! - Delegates parameter parsing and hashing to the domain layer

use crate::domain::entities::{SignedRequest, HMAC_SHA1};
use crate::domain::errors::SignatureError;
use crate::domain::{params, signing};
use crate::ports::inbound::SignatureVerificationApi;
use crate::ports::outbound::ConsumerLookup;
use shared_types::ConsumerIdentity;
use tracing::{debug, warn};

/// Signature Verification Service.
///
/// Holds no state besides the injected consumer lookup; every call
/// re-queries it.
pub struct SignatureVerificationService<C: ConsumerLookup> {
    consumers: C,
}

impl<C: ConsumerLookup> SignatureVerificationService<C> {
    /// Create a new signature verification service.
    ///
    /// # Arguments
    /// * `consumers` - Lookup used to resolve `oauth_consumer_key`
    pub fn new(consumers: C) -> Self {
        Self { consumers }
    }

    async fn verify_inner(&self, request: &SignedRequest) -> Result<ConsumerIdentity, SignatureError> {
        // 1. Protocol + signable parameters
        let collected = params::collect(request)?;
        let oauth = &collected.oauth;

        // 2. Only HMAC-SHA1
        if oauth.signature_method != HMAC_SHA1 {
            return Err(SignatureError::UnsupportedMethod(
                oauth.signature_method.clone(),
            ));
        }

        // 3. Resolve consumer
        let consumer = self
            .consumers
            .find_consumer(&oauth.consumer_key)
            .await?
            .ok_or(SignatureError::UnknownConsumer)?;

        // 4. Base string over exactly the tuple we were given
        let normalized_url = signing::normalize_url(&request.url)?;
        let base = signing::base_string(&request.method, &normalized_url, &collected.signable);

        // 5-6. Keyed hash and constant-time comparison
        let computed = signing::compute_signature(&consumer.secret, &base)?;
        if !signing::signatures_match(&computed, &oauth.signature) {
            return Err(SignatureError::VerificationFailed);
        }

        Ok(consumer.identity())
    }
}

#[async_trait::async_trait]
impl<C: ConsumerLookup> SignatureVerificationApi for SignatureVerificationService<C> {
    async fn verify(&self, request: &SignedRequest) -> Result<ConsumerIdentity, SignatureError> {
        match self.verify_inner(request).await {
            Ok(identity) => {
                debug!(consumer = %identity.key, method = %request.method, "Request signature verified");
                Ok(identity)
            }
            Err(SignatureError::Lookup(e)) => {
                warn!(error = %e, "Consumer lookup failed during verification");
                Err(SignatureError::Lookup(e))
            }
            Err(e) => {
                debug!(reason = %e, method = %request.method, "Request not authenticated");
                Err(e)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
