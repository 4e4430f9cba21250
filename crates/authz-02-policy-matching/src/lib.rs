//! # Policy Matching Subsystem (AUTHZ-02)
//!
//! Decides whether a consumer may perform an action on a resource by
//! checking its stored policies against three wildcard candidates.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Resource splitting, candidate set, decisions
//! - **Ports Layer** (`ports/`): Inbound API, consumer and policy lookups
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Matching Rules
//!
//! - Only the first two `/`-separated segments of a resource path count
//! - Candidates are `<s>:*/*`, `<s>:<seg0>/*` and `<s>:<seg0>/<seg1>`
//! - Any candidate granting the action allows the request. There is no
//!   precedence between broad and narrow grants

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::candidates::{candidate_set, split_resource};
pub use domain::decision::Decision;
pub use ports::inbound::PolicyMatchingApi;
pub use ports::outbound::{ConsumerLookup, PolicyLookup};
pub use service::PolicyMatchingService;
