//! # Integration Tests
//!
//! Shared fixtures plus the flow and node-level suites.

pub mod flows;
pub mod node;

use authz_01_signature_verification::{OAuthSigner, SignedRequest};
use axum::body::Body;
use axum::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Consumer `XYZ` with the three PBS grants used throughout the suite.
pub const XYZ_FIXTURES: &str = r#"{
    "consumers": [
        {"key": "XYZ", "secret": "kd94hf93k423kf44&x!", "name": "PBS"},
        {"key": "ABC", "secret": "other-secret", "name": "Station"}
    ],
    "policies": [
        {"consumer_key": "XYZ", "rid": "rid:pbs:api:program/test-program", "actions": ["get", "put"]},
        {"consumer_key": "XYZ", "rid": "rid:pbs:api:station/*", "actions": ["get", "put", "delete"]},
        {"consumer_key": "XYZ", "rid": "rid:pbs:api:*/*", "actions": ["get"]}
    ]
}"#;

pub const XYZ_KEY: &str = "XYZ";
pub const XYZ_SECRET: &str = "kd94hf93k423kf44&x!";

/// Form-encode an absolute URL for embedding after `/authenticate/`.
pub fn embed_target(target: &str) -> String {
    utf8_percent_encode(target, NON_ALPHANUMERIC).to_string()
}

/// Sign `request` as `key`/`secret` with an Authorization header.
pub fn sign(key: &str, secret: &str, request: SignedRequest) -> SignedRequest {
    OAuthSigner::new(key, secret)
        .sign(request, "integration-nonce", 1_700_000_000)
        .unwrap()
}

/// `/authenticate` call carrying the signed request's method, headers and body.
pub fn authenticate_call(signed: &SignedRequest) -> Request<Body> {
    let mut builder = Request::builder()
        .method(signed.method.as_str())
        .uri(format!("/authenticate/{}", embed_target(&signed.url)));
    for (name, value) in &signed.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.body(Body::from(signed.body.clone())).unwrap()
}

/// `/authorize` call for `path` (a trailing `/` is appended).
pub fn authorize_call(method: &str, key: &str, service: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(format!("/authorize/{key}/{service}/{path}/"))
        .body(Body::empty())
        .unwrap()
}
