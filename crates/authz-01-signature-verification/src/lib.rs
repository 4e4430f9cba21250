//! # Signature Verification Subsystem (AUTHZ-01)
//!
//! Verifies two-legged OAuth 1.0 (HMAC-SHA1) signed requests against the
//! shared secret of a registered consumer.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Parameter extraction, base string, HMAC. No I/O
//! - **Ports Layer** (`ports/`): Inbound API and the consumer lookup it drives
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Security Notes
//!
//! - Signatures are compared in constant time
//! - Unknown consumers and bad signatures fail identically for callers
//! - There is no timestamp window and no nonce cache: a captured request
//!   verifies again for as long as the consumer secret is unchanged

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::{OAuthParams, ParamSource, SignedRequest, HMAC_SHA1, OAUTH_VERSION};
pub use domain::errors::SignatureError;
pub use domain::signing::OAuthSigner;
pub use ports::inbound::SignatureVerificationApi;
pub use ports::outbound::ConsumerLookup;
pub use service::SignatureVerificationService;
