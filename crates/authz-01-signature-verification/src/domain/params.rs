//! # Parameter Extraction
//!
//! Collects protocol and signable parameters from a [`SignedRequest`].
//!
//! Protocol parameters are read from the first source that carries any
//! `oauth_*` parameter, in this order:
//! 1. `Authorization: OAuth ...` header
//! 2. Query string of the target URL
//! 3. Form body (`application/x-www-form-urlencoded` only)
//!
//! Query and form parameters are always signable. Header parameters are
//! signable only when the header is the protocol source; `realm` never is.

use super::entities::{
    OAuthParams, ParamSource, SignedRequest, OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_PREFIX,
    OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD, OAUTH_TIMESTAMP, OAUTH_VERSION, OAUTH_VERSION_PARAM,
};
use super::errors::SignatureError;
use percent_encoding::percent_decode_str;
use url::{form_urlencoded, Url};

/// A parameter name/value pair, decoded.
pub type Param = (String, String);

/// Everything needed to rebuild the signature base string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestParameters {
    pub oauth: OAuthParams,
    /// Protocol, query and form parameters, `oauth_signature` excluded.
    pub signable: Vec<Param>,
}

/// Extract protocol and signable parameters from `request`.
pub fn collect(request: &SignedRequest) -> Result<RequestParameters, SignatureError> {
    let query = query_pairs(request)?;
    let body = form_pairs(request);
    let header = match request.header("authorization") {
        Some(value) => parse_authorization_header(value)?,
        None => None,
    };

    let oauth = if let Some(pairs) = header.as_deref().filter(|p| has_protocol_params(p)) {
        parse_oauth_params(pairs, ParamSource::Header)?
    } else if has_protocol_params(&query) {
        parse_oauth_params(&query, ParamSource::Query)?
    } else if has_protocol_params(&body) {
        parse_oauth_params(&body, ParamSource::Body)?
    } else {
        return Err(SignatureError::MissingParameter(OAUTH_CONSUMER_KEY));
    };

    let mut signable: Vec<Param> = query.into_iter().chain(body).collect();
    if oauth.source == ParamSource::Header {
        signable.extend(header.unwrap_or_default());
    }
    signable.retain(|(name, _)| name != OAUTH_SIGNATURE);

    Ok(RequestParameters { oauth, signable })
}

/// Decoded query string parameters of the target URL.
pub fn query_pairs(request: &SignedRequest) -> Result<Vec<Param>, SignatureError> {
    let url = Url::parse(&request.url).map_err(|e| SignatureError::InvalidUrl(e.to_string()))?;
    Ok(url.query_pairs().into_owned().collect())
}

/// Decoded form body parameters, empty unless the body is a URL-encoded form.
pub fn form_pairs(request: &SignedRequest) -> Vec<Param> {
    if !request.has_form_body() {
        return Vec::new();
    }
    form_urlencoded::parse(&request.body).into_owned().collect()
}

/// Parse an `OAuth` scheme Authorization header.
///
/// Returns `Ok(None)` for other schemes. Only `oauth_*` parameters are kept.
pub fn parse_authorization_header(value: &str) -> Result<Option<Vec<Param>>, SignatureError> {
    let Some(rest) = strip_oauth_scheme(value) else {
        return Ok(None);
    };

    let mut pairs = Vec::new();
    for part in rest.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, raw) = part.split_once('=').ok_or(SignatureError::MalformedHeader)?;
        let quoted = raw
            .trim()
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or(SignatureError::MalformedHeader)?;

        let name = decode(name.trim())?;
        if name.starts_with(OAUTH_PREFIX) {
            pairs.push((name, decode(quoted)?));
        }
    }
    Ok(Some(pairs))
}

fn strip_oauth_scheme(value: &str) -> Option<&str> {
    let value = value.trim_start();
    let scheme = value.get(..5)?;
    if !scheme.eq_ignore_ascii_case("OAuth") {
        return None;
    }
    let rest = &value[5..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest)
}

fn decode(raw: &str) -> Result<String, SignatureError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| SignatureError::MalformedHeader)
}

fn has_protocol_params(pairs: &[Param]) -> bool {
    pairs.iter().any(|(name, _)| name.starts_with(OAUTH_PREFIX))
}

fn first<'a>(pairs: &'a [Param], name: &'static str) -> Result<&'a str, SignatureError> {
    pairs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
        .ok_or(SignatureError::MissingParameter(name))
}

/// Build [`OAuthParams`] from one source's pairs.
pub fn parse_oauth_params(pairs: &[Param], source: ParamSource) -> Result<OAuthParams, SignatureError> {
    let consumer_key = first(pairs, OAUTH_CONSUMER_KEY)?.to_string();
    let signature_method = first(pairs, OAUTH_SIGNATURE_METHOD)?.to_string();
    let nonce = first(pairs, OAUTH_NONCE)?.to_string();
    let timestamp = first(pairs, OAUTH_TIMESTAMP)?
        .parse::<u64>()
        .map_err(|_| SignatureError::MalformedParameter(OAUTH_TIMESTAMP))?;
    let signature = first(pairs, OAUTH_SIGNATURE)?.to_string();
    let version = first(pairs, OAUTH_VERSION_PARAM)?.to_string();

    if version != OAUTH_VERSION {
        return Err(SignatureError::UnsupportedVersion(version));
    }

    Ok(OAuthParams {
        consumer_key,
        signature_method,
        nonce,
        timestamp,
        signature,
        version,
        source,
    })
}
