//! Gateway error types and their HTTP mapping.

use authz_01_signature_verification::SignatureError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shared_types::LookupError;
use thiserror::Error;

/// Errors raised while configuring or running the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind to {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Per-request failure, rendered as a status code and a JSON body.
///
/// Authentication failures carry no detail: a bad signature and an
/// unknown consumer look the same to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("invalid resource")]
    InvalidResource,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            // Fewer than two segments is treated as a server-side fault.
            ApiError::InvalidResource | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<SignatureError> for ApiError {
    fn from(err: SignatureError) -> Self {
        if err.is_unauthenticated() {
            ApiError::Unauthenticated
        } else {
            ApiError::Internal
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(_: LookupError) -> Self {
        ApiError::Internal
    }
}
