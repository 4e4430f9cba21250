//! AUTHZ-03 API Gateway - HTTP interface for authentication and authorization.
//!
//! # Routes
//!
//! ```text
//! GET|POST|PUT|DELETE /authenticate/{encoded target url}
//!     202 {"key","name"}   signature valid
//!     401                  anything else
//!
//! GET|POST|PUT|DELETE /authorize/{consumer_key}/{service}/{resource...}/
//!     202  allowed
//!     401  unknown consumer
//!     403  no policy grants the HTTP method
//!     500  resource has fewer than two segments
//!
//! GET /health
//! ```
//!
//! # Request Reconstruction
//!
//! `/authenticate` verifies a request on behalf of a proxy: the target URL
//! is embedded in the path, while method, headers and body come from the
//! live call. [`TargetRequestBuilder`] assembles that tuple; the verifier
//! never knows it was reconstructed.
//!
//! # Usage
//!
//! ```ignore
//! use authz_03_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::default(), verifier, matcher)?;
//! service.serve(shutdown_signal).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod service;

// Re-exports for public API
pub use domain::config::{ConfigError, GatewayConfig, HttpConfig, LimitsConfig};
pub use domain::error::{ApiError, GatewayError};
pub use domain::target::{TargetError, TargetRequestBuilder};
pub use handlers::AppState;
pub use middleware::TracingLayer;
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
