//! # Inbound Ports (Driving Ports / API)

use crate::domain::decision::Decision;
use shared_types::{Action, LookupError};

/// Primary Policy Matching API.
///
/// Implementations must be thread-safe (`Send + Sync`) and stateless
/// between calls. Repeated calls against an unchanged store return the
/// same decision.
#[async_trait::async_trait]
pub trait PolicyMatchingApi: Send + Sync {
    /// Decide whether `consumer_key` may perform `action` on
    /// `resource_path` within `service`.
    ///
    /// # Errors
    /// * [`LookupError`] - a lookup collaborator failed; never retried
    async fn authorize(
        &self,
        consumer_key: &str,
        service: &str,
        resource_path: &str,
        action: Action,
    ) -> Result<Decision, LookupError>;
}
