//! Reconstruction of the request a proxy is asking us to verify.
//!
//! The proxy calls `/authenticate/<target>` where `<target>` is the
//! form-encoded absolute URL of the original request. Method, headers and
//! body are taken from the live call unchanged.

use authz_01_signature_verification::SignedRequest;
use axum::http::{HeaderMap, Method};
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Failure to recover the embedded target URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("embedded target URL is empty")]
    Empty,

    #[error("embedded target URL is not valid UTF-8")]
    NotUtf8,
}

/// Builds a [`SignedRequest`] from an embedded target URL and the live
/// request's method, headers and body.
#[derive(Debug, Clone)]
pub struct TargetRequestBuilder<'a> {
    encoded_target: &'a str,
    method: &'a Method,
    headers: Option<&'a HeaderMap>,
    body: &'a [u8],
}

impl<'a> TargetRequestBuilder<'a> {
    pub fn new(encoded_target: &'a str, method: &'a Method) -> Self {
        Self {
            encoded_target,
            method,
            headers: None,
            body: &[],
        }
    }

    pub fn headers(mut self, headers: &'a HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn body(mut self, body: &'a [u8]) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<SignedRequest, TargetError> {
        let url = decode_target(self.encoded_target)?;

        // Non-UTF-8 header values cannot take part in signing; skip them.
        let headers = self
            .headers
            .into_iter()
            .flat_map(HeaderMap::iter)
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        Ok(SignedRequest {
            method: self.method.as_str().to_string(),
            url,
            headers,
            body: self.body.to_vec(),
        })
    }
}

/// Form-decode the raw path tail: `+` is a space, `%XX` is a byte.
pub fn decode_target(encoded: &str) -> Result<String, TargetError> {
    let encoded = encoded.trim_start_matches('/');
    if encoded.is_empty() {
        return Err(TargetError::Empty);
    }
    let spaced = encoded.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| TargetError::NotUtf8)
}
