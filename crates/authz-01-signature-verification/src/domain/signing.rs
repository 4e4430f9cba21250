//! # HMAC-SHA1 Request Signing
//!
//! Signature base string construction and the keyed hash, as used by both
//! the verifier and [`OAuthSigner`] (the client side).
//!
//! ```text
//! base   = UPPER(method) "&" enc(normalized_url) "&" enc(normalized_params)
//! key    = enc(consumer_secret) "&"            (no token secret, two-legged)
//! digest = base64(HMAC-SHA1(key, base))
//! ```

use super::entities::{
    SignedRequest, HMAC_SHA1, OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE,
    OAUTH_SIGNATURE_METHOD, OAUTH_TIMESTAMP, OAUTH_VERSION, OAUTH_VERSION_PARAM,
};
use super::errors::SignatureError;
use super::params::{self, Param};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;
use std::fmt::Write as _;
use subtle::ConstantTimeEq;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// Everything except the RFC 3986 unreserved characters.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode with uppercase hex, leaving only unreserved characters.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Scheme and host lowercased, default port stripped, path kept,
/// query and fragment dropped.
pub fn normalize_url(raw: &str) -> Result<String, SignatureError> {
    let url = Url::parse(raw).map_err(|e| SignatureError::InvalidUrl(e.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| SignatureError::InvalidUrl(raw.to_string()))?;

    let mut normalized = format!("{}://{}", url.scheme(), host.to_ascii_lowercase());
    // `port()` is None when the port is the scheme default
    if let Some(port) = url.port() {
        let _ = write!(normalized, ":{port}");
    }
    match url.path() {
        "" => normalized.push('/'),
        path => normalized.push_str(path),
    }
    Ok(normalized)
}

/// Encode every name and value, sort by name then value, join with `&`.
pub fn normalize_parameters(params: &[Param]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(name, value)| (encode(name), encode(value)))
        .collect();
    encoded.sort();
    encoded
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// The signature base string.
pub fn base_string(method: &str, normalized_url: &str, params: &[Param]) -> String {
    format!(
        "{}&{}&{}",
        encode(&method.to_ascii_uppercase()),
        encode(normalized_url),
        encode(&normalize_parameters(params))
    )
}

/// Base64 HMAC-SHA1 of `base` under the full signing key.
pub fn hmac_sha1_base64(key: &str, base: &str) -> Result<String, SignatureError> {
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| SignatureError::VerificationFailed)?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Two-legged signature: the token secret component is empty.
pub fn compute_signature(consumer_secret: &str, base: &str) -> Result<String, SignatureError> {
    hmac_sha1_base64(&format!("{}&", encode(consumer_secret)), base)
}

/// Constant-time comparison of two encoded signatures.
pub fn signatures_match(computed: &str, supplied: &str) -> bool {
    computed.as_bytes().ct_eq(supplied.as_bytes()).into()
}

// =============================================================================
// CLIENT-SIDE SIGNER
// =============================================================================

/// Signs requests on behalf of a consumer.
///
/// Produces exactly what the verifier expects, so it doubles as the
/// reference client for tests and tooling.
#[derive(Clone)]
pub struct OAuthSigner {
    consumer_key: String,
    consumer_secret: String,
}

impl std::fmt::Debug for OAuthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<REDACTED>")
            .finish()
    }
}

impl OAuthSigner {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    fn protocol_params(&self, nonce: &str, timestamp: u64) -> Vec<Param> {
        vec![
            (OAUTH_CONSUMER_KEY.to_string(), self.consumer_key.clone()),
            (OAUTH_NONCE.to_string(), nonce.to_string()),
            (OAUTH_SIGNATURE_METHOD.to_string(), HMAC_SHA1.to_string()),
            (OAUTH_TIMESTAMP.to_string(), timestamp.to_string()),
            (OAUTH_VERSION_PARAM.to_string(), OAUTH_VERSION.to_string()),
        ]
    }

    /// Protocol parameters including `oauth_signature` for `request`.
    pub fn signed_params(
        &self,
        request: &SignedRequest,
        nonce: &str,
        timestamp: u64,
    ) -> Result<Vec<Param>, SignatureError> {
        let mut protocol = self.protocol_params(nonce, timestamp);

        let mut signable = params::query_pairs(request)?;
        signable.extend(params::form_pairs(request));
        signable.extend(protocol.iter().cloned());

        let base = base_string(&request.method, &normalize_url(&request.url)?, &signable);
        let signature = compute_signature(&self.consumer_secret, &base)?;
        protocol.push((OAUTH_SIGNATURE.to_string(), signature));
        Ok(protocol)
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(
        &self,
        request: &SignedRequest,
        nonce: &str,
        timestamp: u64,
    ) -> Result<String, SignatureError> {
        let fields = self
            .signed_params(request, nonce, timestamp)?
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", encode(name), encode(value)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }

    /// Sign with an `Authorization` header.
    pub fn sign(
        &self,
        request: SignedRequest,
        nonce: &str,
        timestamp: u64,
    ) -> Result<SignedRequest, SignatureError> {
        let header = self.authorization_header(&request, nonce, timestamp)?;
        Ok(request.with_header("Authorization", header))
    }

    /// Sign by appending the protocol parameters to the URL query string.
    pub fn sign_query(
        &self,
        mut request: SignedRequest,
        nonce: &str,
        timestamp: u64,
    ) -> Result<SignedRequest, SignatureError> {
        let signed = self.signed_params(&request, nonce, timestamp)?;
        let mut url =
            Url::parse(&request.url).map_err(|e| SignatureError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().extend_pairs(signed);
        request.url = url.to_string();
        Ok(request)
    }
}
