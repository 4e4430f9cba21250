//! HTTP handlers for the authenticate, authorize and health routes.

use crate::domain::error::ApiError;
use crate::domain::target::TargetRequestBuilder;
use authz_01_signature_verification::SignatureVerificationApi;
use authz_02_policy_matching::{Decision, PolicyMatchingApi};
use axum::body::Bytes;
use axum::extract::{OriginalUri, Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use shared_types::{Action, ConsumerIdentity};
use std::sync::Arc;
use tracing::debug;

/// Route prefix in front of the embedded target URL.
pub const AUTHENTICATE_PREFIX: &str = "/authenticate/";

/// Shared handler state: the two core services behind their inbound ports.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn SignatureVerificationApi>,
    pub matcher: Arc<dyn PolicyMatchingApi>,
}

impl AppState {
    pub fn new(
        verifier: Arc<dyn SignatureVerificationApi>,
        matcher: Arc<dyn PolicyMatchingApi>,
    ) -> Self {
        Self { verifier, matcher }
    }
}

/// `/authenticate/<encoded target url>`
///
/// The target is read from the raw request path so that encoded `/`, `?`
/// and `&` inside it survive routing. A query string on the live call
/// itself is not part of the target.
pub async fn authenticate(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ConsumerIdentity>), ApiError> {
    let encoded = uri
        .path()
        .strip_prefix(AUTHENTICATE_PREFIX)
        .ok_or(ApiError::Unauthenticated)?;

    let request = TargetRequestBuilder::new(encoded, &method)
        .headers(&headers)
        .body(&body)
        .build()
        .map_err(|e| {
            debug!(error = %e, "Rejecting unusable target URL");
            ApiError::Unauthenticated
        })?;

    let identity = state.verifier.verify(&request).await?;
    Ok((StatusCode::ACCEPTED, Json(identity)))
}

/// `/authorize/<consumer_key>/<service>/<resource path>/`
///
/// The HTTP method of this call is the action being authorized.
pub async fn authorize(
    State(state): State<AppState>,
    method: Method,
    Path((consumer_key, service, resource)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError> {
    let action: Action = method
        .as_str()
        .parse()
        .map_err(|_| ApiError::MethodNotAllowed)?;

    let resource = resource.strip_suffix('/').unwrap_or(&resource);

    match state
        .matcher
        .authorize(&consumer_key, &service, resource, action)
        .await?
    {
        Decision::Allowed => Ok(StatusCode::ACCEPTED),
        Decision::Forbidden => Err(ApiError::Forbidden),
        Decision::InvalidResource => Err(ApiError::InvalidResource),
        Decision::Unauthenticated => Err(ApiError::Unauthenticated),
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}
