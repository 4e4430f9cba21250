//! # Domain Entities
//!
//! Core data structures shared by the authz subsystems.

use crate::errors::EntityError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// FIELD LIMITS
// =============================================================================

/// Maximum length of a consumer key.
pub const MAX_KEY_LEN: usize = 24;

/// Maximum length of a consumer secret.
pub const MAX_SECRET_LEN: usize = 48;

/// Maximum length of a consumer display name.
pub const MAX_NAME_LEN: usize = 30;

/// Maximum length of a serialized resource identifier.
pub const MAX_RID_LEN: usize = 200;

// =============================================================================
// CONSUMER
// =============================================================================

/// A registered API caller identified by a unique key/secret pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumer {
    /// Unique consumer key (exact-match lookup only).
    pub key: String,
    /// Shared secret used as the HMAC key.
    pub secret: String,
    /// Display name.
    pub name: String,
}

impl Consumer {
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            name: name.into(),
        }
    }

    /// Check field bounds. Key uniqueness is the store's concern.
    pub fn validate(&self) -> Result<(), EntityError> {
        check_len("key", &self.key, MAX_KEY_LEN)?;
        check_len("secret", &self.secret, MAX_SECRET_LEN)?;
        check_len("name", &self.name, MAX_NAME_LEN)?;
        Ok(())
    }

    /// The public identity returned to callers after authentication.
    pub fn identity(&self) -> ConsumerIdentity {
        ConsumerIdentity {
            key: self.key.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Debug for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("key", &self.key)
            .field("secret", &"<REDACTED>")
            .field("name", &self.name)
            .finish()
    }
}

/// Authenticated consumer, as returned by signature verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerIdentity {
    pub key: String,
    pub name: String,
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), EntityError> {
    if value.is_empty() {
        return Err(EntityError::EmptyField(field));
    }
    let len = value.chars().count();
    if len > max {
        return Err(EntityError::TooLong { field, len, max });
    }
    Ok(())
}

// =============================================================================
// ACTION
// =============================================================================

/// An action a policy can grant. Matched case-insensitively against the
/// HTTP verb of the originating call.
///
/// Serialized as the lowercase token; deserialized through [`FromStr`], so
/// `"GET"` and `"get"` load the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Get,
    Post,
    Put,
    Delete,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 4] = [Action::Get, Action::Post, Action::Put, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::Post => "post",
            Action::Put => "put",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Action::Get),
            "post" => Ok(Action::Post),
            "put" => Ok(Action::Put),
            "delete" => Ok(Action::Delete),
            _ => Err(EntityError::UnknownAction(s.to_string())),
        }
    }
}

impl Serialize for Action {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Non-empty set of granted actions. Duplicates collapse, order is irrelevant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Action>", into = "Vec<Action>")]
pub struct ActionSet(BTreeSet<Action>);

impl ActionSet {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Result<Self, EntityError> {
        let set: BTreeSet<Action> = actions.into_iter().collect();
        if set.is_empty() {
            return Err(EntityError::EmptyActionSet);
        }
        Ok(Self(set))
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Action>> for ActionSet {
    type Error = EntityError;

    fn try_from(actions: Vec<Action>) -> Result<Self, Self::Error> {
        ActionSet::new(actions)
    }
}

impl From<ActionSet> for Vec<Action> {
    fn from(set: ActionSet) -> Self {
        set.0.into_iter().collect()
    }
}

// =============================================================================
// RESOURCE IDENTIFIER
// =============================================================================

/// Literal wildcard segment.
pub const WILDCARD: &str = "*";

const RID_PREFIX: &str = "rid:";

/// Canonical resource identifier `rid:<service>:<segment0>/<segment1>`.
///
/// The service is an opaque namespace token and may itself contain `:`
/// (e.g. `pbs:api`). Either segment may be the wildcard `*`.
///
/// Identity is the rendered string: `{svc, "a:b", "c"}` and
/// `{"svc:a", "b", "c"}` are the same rid. Equality, ordering and hashing
/// all go through it.
#[derive(Clone, Debug)]
pub struct ResourceId {
    service: String,
    segment0: String,
    segment1: String,
    canonical: String,
}

impl ResourceId {
    pub fn new(
        service: impl Into<String>,
        segment0: impl Into<String>,
        segment1: impl Into<String>,
    ) -> Self {
        let (service, segment0, segment1) = (service.into(), segment0.into(), segment1.into());
        let canonical = format!("{RID_PREFIX}{service}:{segment0}/{segment1}");
        Self {
            service,
            segment0,
            segment1,
            canonical,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn segment0(&self) -> &str {
        &self.segment0
    }

    pub fn segment1(&self) -> &str {
        &self.segment1
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for ResourceId {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for ResourceId {}

impl std::hash::Hash for ResourceId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for ResourceId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResourceId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for ResourceId {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EntityError::InvalidResourceId(s.to_string());

        if s.len() > MAX_RID_LEN {
            return Err(EntityError::TooLong {
                field: "rid",
                len: s.len(),
                max: MAX_RID_LEN,
            });
        }

        let rest = s.strip_prefix(RID_PREFIX).ok_or_else(invalid)?;
        let (service, path) = rest.rsplit_once(':').ok_or_else(invalid)?;
        let (segment0, segment1) = path.split_once('/').ok_or_else(invalid)?;

        if service.is_empty() || segment0.is_empty() || segment1.is_empty() {
            return Err(invalid());
        }
        if segment1.contains('/') {
            return Err(invalid());
        }

        Ok(ResourceId::new(service, segment0, segment1))
    }
}

impl Serialize for ResourceId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// POLICY
// =============================================================================

/// A grant tying a consumer to a resource pattern and an allowed action set.
///
/// Identified by `(consumer_key, rid)`. The consumer reference is not
/// enforced: a dangling key simply never matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub consumer_key: String,
    pub rid: ResourceId,
    pub actions: ActionSet,
}

impl Policy {
    pub fn new(consumer_key: impl Into<String>, rid: ResourceId, actions: ActionSet) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            rid,
            actions,
        }
    }

    pub fn validate(&self) -> Result<(), EntityError> {
        check_len("consumer_key", &self.consumer_key, MAX_KEY_LEN)?;
        let rid_len = self.rid.as_str().len();
        if rid_len > MAX_RID_LEN {
            return Err(EntityError::TooLong {
                field: "rid",
                len: rid_len,
                max: MAX_RID_LEN,
            });
        }
        Ok(())
    }

    /// True if this policy covers `rid` exactly and grants `action`.
    pub fn grants(&self, rid: &ResourceId, action: Action) -> bool {
        &self.rid == rid && self.actions.contains(action)
    }
}
