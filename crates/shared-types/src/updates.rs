//! # Update Contracts
//!
//! Explicit, enumerated mutations for stored entities. Identity fields
//! (`Consumer::key`, `Policy::consumer_key`, `Policy::rid`) are not
//! representable here and therefore cannot be changed by an update.

use crate::credentials::{generate_key, generate_secret};
use crate::entities::{ActionSet, Consumer, Policy, MAX_KEY_LEN, MAX_SECRET_LEN};
use crate::errors::EntityError;
use serde::{Deserialize, Serialize};

/// Request to register a consumer. Missing credentials are generated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewConsumer {
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

impl NewConsumer {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build the consumer, generating key and secret where absent.
    pub fn into_consumer(self) -> Result<Consumer, EntityError> {
        let consumer = Consumer {
            key: self
                .key
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| generate_key(MAX_KEY_LEN)),
            secret: self
                .secret
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| generate_secret(MAX_SECRET_LEN)),
            name: self.name,
        };
        consumer.validate()?;
        Ok(consumer)
    }
}

/// Mutable consumer fields. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsumerUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

impl ConsumerUpdate {
    /// Apply to a copy of `consumer`, validating the result.
    pub fn apply(&self, consumer: &Consumer) -> Result<Consumer, EntityError> {
        let mut updated = consumer.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(secret) = &self.secret {
            updated.secret = secret.clone();
        }
        updated.validate()?;
        Ok(updated)
    }
}

/// Mutable policy fields. Only the action set may change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyUpdate {
    pub actions: ActionSet,
}

impl PolicyUpdate {
    pub fn apply(&self, policy: &Policy) -> Policy {
        Policy {
            actions: self.actions.clone(),
            ..policy.clone()
        }
    }
}
