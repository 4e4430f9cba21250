//! # Directory Fixtures
//!
//! JSON seed data for the in-memory directory:
//!
//! ```json
//! {
//!   "consumers": [{"key": "XYZ", "secret": "...", "name": "PBS"}],
//!   "policies":  [{"consumer_key": "XYZ", "rid": "rid:pbs:api:station/*", "actions": ["get", "put"]}]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared_types::{Consumer, Policy};
use thiserror::Error;
use tracing::info;

use crate::adapters::directory::{DirectoryError, InMemoryDirectory};

/// Errors while loading or applying fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixtures {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed fixtures: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Fixture rejected by directory: {0}")]
    Directory(#[from] DirectoryError),
}

/// Seed contents for an [`InMemoryDirectory`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryFixtures {
    pub consumers: Vec<Consumer>,
    pub policies: Vec<Policy>,
}

impl DirectoryFixtures {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Insert every consumer, then every policy. Stops at the first
    /// rejected entry; earlier entries stay applied.
    pub fn apply(self, directory: &InMemoryDirectory) -> Result<(), FixtureError> {
        let consumers = self.consumers.len();
        let policies = self.policies.len();
        for consumer in self.consumers {
            directory.insert_consumer(consumer)?;
        }
        for policy in self.policies {
            directory.upsert_policy(policy)?;
        }
        info!(consumers, policies, "Directory seeded from fixtures");
        Ok(())
    }
}
