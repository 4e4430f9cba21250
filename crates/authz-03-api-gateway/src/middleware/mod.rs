//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → Tracing → BodyLimit → Handler

pub mod tracing;

pub use tracing::TracingLayer;
