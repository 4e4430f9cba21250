//! # In-Memory Directory
//!
//! Consumer and policy store backing both lookup ports.
//!
//! ## Thread Safety
//!
//! - Single `parking_lot::RwLock` around both tables
//! - Lookups take the read lock and never hold it across an `.await`
//! - Admin writes are serialized; a delete and its policy cascade are atomic

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{
    Action, Consumer, ConsumerLookup, ConsumerUpdate, EntityError, LookupError, NewConsumer,
    Policy, PolicyLookup, PolicyUpdate, ResourceId,
};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from administrative directory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("Consumer `{0}` already exists")]
    DuplicateConsumer(String),

    #[error("Consumer `{0}` not found")]
    ConsumerNotFound(String),

    #[error("No policy for consumer `{consumer_key}` on `{rid}`")]
    PolicyNotFound { consumer_key: String, rid: String },

    #[error(transparent)]
    Invalid(#[from] EntityError),
}

#[derive(Default)]
struct Tables {
    consumers: BTreeMap<String, Consumer>,
    policies: BTreeMap<String, BTreeMap<ResourceId, Policy>>,
}

/// Consumer and policy tables shared by the verifier, the matcher and the
/// admin side.
#[derive(Default)]
pub struct InMemoryDirectory {
    tables: RwLock<Tables>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consumer, generating any missing key or secret.
    pub fn create_consumer(&self, request: NewConsumer) -> Result<Consumer, DirectoryError> {
        let consumer = request.into_consumer()?;
        self.insert_consumer(consumer.clone())?;
        Ok(consumer)
    }

    /// Insert a fully specified consumer. Keys are unique.
    pub fn insert_consumer(&self, consumer: Consumer) -> Result<(), DirectoryError> {
        consumer.validate()?;
        let mut tables = self.tables.write();
        if tables.consumers.contains_key(&consumer.key) {
            return Err(DirectoryError::DuplicateConsumer(consumer.key));
        }
        info!(consumer = %consumer.key, name = %consumer.name, "Consumer registered");
        tables.consumers.insert(consumer.key.clone(), consumer);
        Ok(())
    }

    pub fn update_consumer(
        &self,
        key: &str,
        update: &ConsumerUpdate,
    ) -> Result<Consumer, DirectoryError> {
        let mut tables = self.tables.write();
        let current = tables
            .consumers
            .get(key)
            .ok_or_else(|| DirectoryError::ConsumerNotFound(key.to_string()))?;
        let updated = update.apply(current)?;
        tables.consumers.insert(key.to_string(), updated.clone());
        info!(consumer = key, "Consumer updated");
        Ok(updated)
    }

    /// Remove a consumer together with all of its policies.
    pub fn delete_consumer(&self, key: &str) -> Result<Consumer, DirectoryError> {
        let mut tables = self.tables.write();
        let removed = tables
            .consumers
            .remove(key)
            .ok_or_else(|| DirectoryError::ConsumerNotFound(key.to_string()))?;
        let dropped = tables.policies.remove(key).map_or(0, |p| p.len());
        info!(consumer = key, policies = dropped, "Consumer deleted");
        Ok(removed)
    }

    /// Insert or replace the policy identified by `(consumer_key, rid)`.
    pub fn upsert_policy(&self, policy: Policy) -> Result<(), DirectoryError> {
        policy.validate()?;
        let mut tables = self.tables.write();
        if !tables.consumers.contains_key(&policy.consumer_key) {
            return Err(DirectoryError::ConsumerNotFound(policy.consumer_key));
        }
        debug!(consumer = %policy.consumer_key, rid = %policy.rid, "Policy stored");
        tables
            .policies
            .entry(policy.consumer_key.clone())
            .or_default()
            .insert(policy.rid.clone(), policy);
        Ok(())
    }

    pub fn update_policy(
        &self,
        consumer_key: &str,
        rid: &ResourceId,
        update: &PolicyUpdate,
    ) -> Result<Policy, DirectoryError> {
        let mut tables = self.tables.write();
        let slot = tables
            .policies
            .get_mut(consumer_key)
            .and_then(|by_rid| by_rid.get_mut(rid))
            .ok_or_else(|| policy_not_found(consumer_key, rid))?;
        *slot = update.apply(slot);
        Ok(slot.clone())
    }

    pub fn delete_policy(
        &self,
        consumer_key: &str,
        rid: &ResourceId,
    ) -> Result<Policy, DirectoryError> {
        let mut tables = self.tables.write();
        let by_rid = tables
            .policies
            .get_mut(consumer_key)
            .ok_or_else(|| policy_not_found(consumer_key, rid))?;
        let removed = by_rid
            .remove(rid)
            .ok_or_else(|| policy_not_found(consumer_key, rid))?;
        if by_rid.is_empty() {
            tables.policies.remove(consumer_key);
        }
        Ok(removed)
    }

    /// Snapshot of all consumers, ordered by key.
    pub fn consumers(&self) -> Vec<Consumer> {
        self.tables.read().consumers.values().cloned().collect()
    }

    /// Snapshot of one consumer's policies, ordered by rid.
    pub fn policies_for(&self, consumer_key: &str) -> Vec<Policy> {
        self.tables
            .read()
            .policies
            .get(consumer_key)
            .map(|by_rid| by_rid.values().cloned().collect())
            .unwrap_or_default()
    }
}

fn policy_not_found(consumer_key: &str, rid: &ResourceId) -> DirectoryError {
    DirectoryError::PolicyNotFound {
        consumer_key: consumer_key.to_string(),
        rid: rid.to_string(),
    }
}

#[async_trait]
impl ConsumerLookup for InMemoryDirectory {
    async fn find_consumer(&self, key: &str) -> Result<Option<Consumer>, LookupError> {
        Ok(self.tables.read().consumers.get(key).cloned())
    }
}

#[async_trait]
impl PolicyLookup for InMemoryDirectory {
    async fn has_matching_policy(
        &self,
        consumer_key: &str,
        candidates: &[ResourceId],
        action: Action,
    ) -> Result<bool, LookupError> {
        let tables = self.tables.read();
        let Some(by_rid) = tables.policies.get(consumer_key) else {
            return Ok(false);
        };
        Ok(candidates
            .iter()
            .filter_map(|rid| by_rid.get(rid))
            .any(|policy| policy.actions.contains(action)))
    }
}
