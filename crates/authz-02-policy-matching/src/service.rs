//! # Policy Matching Service
//!
//! Application service layer that implements the `PolicyMatchingApi` trait.
//!
//! ## Flow
//!
//! 1. Resolve the consumer (`Unauthenticated` if unknown)
//! 2. Split the resource path (`InvalidResource` below two segments)
//! 3. Build the candidate set
//! 4. Ask the policy lookup for any candidate granting the action

use crate::domain::candidates::{candidate_set, split_resource};
use crate::domain::decision::Decision;
use crate::ports::inbound::PolicyMatchingApi;
use crate::ports::outbound::{ConsumerLookup, LookupError, PolicyLookup};
use shared_types::Action;
use tracing::{debug, warn};

/// Policy Matching Service.
///
/// Holds only the injected lookups; no caching between calls.
pub struct PolicyMatchingService<C: ConsumerLookup, P: PolicyLookup> {
    consumers: C,
    policies: P,
}

impl<C: ConsumerLookup, P: PolicyLookup> PolicyMatchingService<C, P> {
    /// Create a new policy matching service.
    ///
    /// # Arguments
    /// * `consumers` - Lookup used to resolve the consumer key
    /// * `policies` - Lookup queried with the candidate set
    pub fn new(consumers: C, policies: P) -> Self {
        Self {
            consumers,
            policies,
        }
    }

    async fn decide(
        &self,
        consumer_key: &str,
        service: &str,
        resource_path: &str,
        action: Action,
    ) -> Result<Decision, LookupError> {
        let Some(consumer) = self.consumers.find_consumer(consumer_key).await? else {
            return Ok(Decision::Unauthenticated);
        };

        let Some((segment0, segment1)) = split_resource(resource_path) else {
            return Ok(Decision::InvalidResource);
        };

        let candidates = candidate_set(service, segment0, segment1);
        let granted = self
            .policies
            .has_matching_policy(&consumer.key, &candidates, action)
            .await?;

        Ok(if granted {
            Decision::Allowed
        } else {
            Decision::Forbidden
        })
    }
}

#[async_trait::async_trait]
impl<C: ConsumerLookup, P: PolicyLookup> PolicyMatchingApi for PolicyMatchingService<C, P> {
    async fn authorize(
        &self,
        consumer_key: &str,
        service: &str,
        resource_path: &str,
        action: Action,
    ) -> Result<Decision, LookupError> {
        let result = self
            .decide(consumer_key, service, resource_path, action)
            .await;
        match &result {
            Ok(decision) => debug!(
                consumer = consumer_key,
                service,
                resource = resource_path,
                %action,
                %decision,
                "Authorization decided"
            ),
            Err(e) => warn!(error = %e, consumer = consumer_key, "Lookup failed during authorization"),
        }
        result
    }
}

// =============================================================================
// TESTS
// =============================================================================
