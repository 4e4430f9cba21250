//! # Domain Entities
//!
//! Core data structures for signature verification.

/// The only supported signature method.
pub const HMAC_SHA1: &str = "HMAC-SHA1";

/// The only supported protocol version.
pub const OAUTH_VERSION: &str = "1.0";

// Wire-level protocol parameter names.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_VERSION_PARAM: &str = "oauth_version";

/// Prefix shared by every protocol parameter.
pub const OAUTH_PREFIX: &str = "oauth_";

/// Content type whose body parameters take part in signing.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The `(method, url, headers, body)` tuple a signature is checked against.
///
/// The verifier does not care where this came from: it may be the physical
/// inbound call or a request reconstructed by the transport from an embedded
/// target URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignedRequest {
    /// HTTP method (any case; uppercased for signing)
    pub method: String,
    /// Absolute target URL, query string included
    pub url: String,
    /// Header name/value pairs (names compared case-insensitively)
    pub headers: Vec<(String, String)>,
    /// Raw request body
    pub body: Vec<u8>,
}

impl SignedRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// First header value with the given name, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True if the body is a form whose parameters are signed.
    pub fn has_form_body(&self) -> bool {
        self.header("content-type")
            .map(|ct| {
                ct.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .eq_ignore_ascii_case(FORM_CONTENT_TYPE)
            })
            .unwrap_or(false)
    }
}

/// Where the protocol parameters were found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamSource {
    Header,
    Query,
    Body,
}

/// Parsed protocol parameters of a signed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthParams {
    pub consumer_key: String,
    pub signature_method: String,
    pub nonce: String,
    pub timestamp: u64,
    pub signature: String,
    pub version: String,
    pub source: ParamSource,
}
