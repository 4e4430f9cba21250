//! # Subsystem Container
//!
//! Builds the directory and wires it into both core services.
//!
//! ```text
//! InMemoryDirectory ──ConsumerLookup──→ SignatureVerificationService
//!         │          ──ConsumerLookup──┐
//!         └──────────  PolicyLookup ───┴→ PolicyMatchingService
//! ```

use std::sync::Arc;

use authz_01_signature_verification::{SignatureVerificationApi, SignatureVerificationService};
use authz_02_policy_matching::{PolicyMatchingApi, PolicyMatchingService};
use tracing::{info, instrument};

use crate::adapters::{DirectoryFixtures, FixtureError, InMemoryDirectory};
use crate::container::config::NodeConfig;

/// Concrete verifier type over the shared directory.
pub type ConcreteVerifier = SignatureVerificationService<Arc<InMemoryDirectory>>;

/// Concrete matcher type over the shared directory.
pub type ConcreteMatcher = PolicyMatchingService<Arc<InMemoryDirectory>, Arc<InMemoryDirectory>>;

/// Central container holding the directory and both core services.
pub struct SubsystemContainer {
    /// Shared store; also the admin surface.
    pub directory: Arc<InMemoryDirectory>,
    pub verifier: Arc<ConcreteVerifier>,
    pub matcher: Arc<ConcreteMatcher>,
}

impl SubsystemContainer {
    /// Create the container, seeding the directory from configured fixtures.
    #[instrument(skip(config))]
    pub fn new(config: &NodeConfig) -> Result<Self, FixtureError> {
        let directory = Arc::new(InMemoryDirectory::new());

        if let Some(path) = &config.directory.fixtures {
            info!(path = %path.display(), "Loading directory fixtures");
            DirectoryFixtures::load(path)?.apply(&directory)?;
        } else {
            info!("No fixtures configured, directory starts empty");
        }

        Ok(Self::with_directory(directory))
    }

    /// Wire both services to an existing directory.
    pub fn with_directory(directory: Arc<InMemoryDirectory>) -> Self {
        let verifier = Arc::new(SignatureVerificationService::new(Arc::clone(&directory)));
        let matcher = Arc::new(PolicyMatchingService::new(
            Arc::clone(&directory),
            Arc::clone(&directory),
        ));
        Self {
            directory,
            verifier,
            matcher,
        }
    }

    pub fn verification_api(&self) -> Arc<dyn SignatureVerificationApi> {
        self.verifier.clone()
    }

    pub fn matching_api(&self) -> Arc<dyn PolicyMatchingApi> {
        self.matcher.clone()
    }
}
