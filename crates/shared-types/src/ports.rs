//! # Lookup Ports (Driven Ports / SPI)
//!
//! Read-only queries the core subsystems need from the surrounding system.
//! Each call re-queries the store; nothing is cached across calls.
//! Snapshot consistency under concurrent writes is the implementor's concern.

use crate::entities::{Action, Consumer, ResourceId};
use crate::errors::LookupError;

/// Exact-match consumer lookup by key.
#[async_trait::async_trait]
pub trait ConsumerLookup: Send + Sync {
    /// Find the consumer with exactly this key.
    ///
    /// # Returns
    /// * `Ok(None)` - No consumer has this key
    async fn find_consumer(&self, key: &str) -> Result<Option<Consumer>, LookupError>;
}

/// Policy existence query over a candidate set of resource identifiers.
#[async_trait::async_trait]
pub trait PolicyLookup: Send + Sync {
    /// True if any policy of `consumer_key` has a `rid` equal to one of
    /// `candidates` and an action set containing `action`.
    async fn has_matching_policy(
        &self,
        consumer_key: &str,
        candidates: &[ResourceId],
        action: Action,
    ) -> Result<bool, LookupError>;
}

#[async_trait::async_trait]
impl<T: ConsumerLookup + ?Sized> ConsumerLookup for std::sync::Arc<T> {
    async fn find_consumer(&self, key: &str) -> Result<Option<Consumer>, LookupError> {
        (**self).find_consumer(key).await
    }
}

#[async_trait::async_trait]
impl<T: PolicyLookup + ?Sized> PolicyLookup for std::sync::Arc<T> {
    async fn has_matching_policy(
        &self,
        consumer_key: &str,
        candidates: &[ResourceId],
        action: Action,
    ) -> Result<bool, LookupError> {
        (**self)
            .has_matching_policy(consumer_key, candidates, action)
            .await
    }
}
