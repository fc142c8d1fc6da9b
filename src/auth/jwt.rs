//! Per-request JWT signing.
//!
//! Apps installed with a shared secret authenticate each request with a
//! short-lived HS256 token. Besides the usual `iss`/`iat`/`exp` claims the
//! token carries a `qsh` claim: the SHA-256 hex digest of the canonical
//! request, which binds the token to one method, path and query string.
//!
//! # Canonical Request
//!
//! `METHOD&path&query` where:
//! - `METHOD` is upper-case
//! - `path` has the context path removed, keeps a leading `/`, drops any
//!   trailing `/` (the root stays `/`) and encodes `&` as `%26`
//! - `query` is sorted by key, excludes `jwt`, joins repeated keys' values
//!   with `,`, and percent-encodes keys and values (RFC 3986)
//!
//! # Example
//!
//! ```rust
//! use tracker_rest::auth::jwt::canonical_request;
//! use tracker_rest::HttpMethod;
//!
//! let canonical = canonical_request(HttpMethod::Get, "/jira/rest/api/2/search?maxResults=5&jql=a b", "/jira");
//! assert_eq!(canonical, "GET&/rest/api/2/search&jql=a%20b&maxResults=5");
//! ```

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::clients::{HttpError, HttpMethod};
use crate::config::SharedSecret;

/// Seconds the `iat` claim is backdated to tolerate clock skew.
const ISSUED_AT_LEEWAY_SECS: i64 = 60;

/// Token lifetime in seconds.
const TOKEN_LIFETIME_SECS: i64 = 86_400;

/// Claims carried by a request token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestClaims {
    /// Issuer (the app key).
    pub iss: String,
    /// Issued-at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Query string hash of the canonical request.
    pub qsh: String,
}

impl RequestClaims {
    /// Builds the claims for one request at the given instant.
    #[must_use]
    pub fn new(
        issuer: &str,
        method: HttpMethod,
        path_and_query: &str,
        context_path: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let canonical = canonical_request(method, path_and_query, context_path);
        Self {
            iss: issuer.to_string(),
            iat: (now - Duration::seconds(ISSUED_AT_LEEWAY_SECS)).timestamp(),
            exp: (now + Duration::seconds(TOKEN_LIFETIME_SECS)).timestamp(),
            qsh: query_string_hash(&canonical),
        }
    }
}

/// Signs a token for one request.
///
/// # Errors
///
/// Returns [`HttpError::Signing`] if encoding fails.
pub fn sign_request(
    issuer: &str,
    secret: &SharedSecret,
    method: HttpMethod,
    path_and_query: &str,
    context_path: &str,
    now: DateTime<Utc>,
) -> Result<String, HttpError> {
    let claims = RequestClaims::new(issuer, method, path_and_query, context_path, now);
    let key = EncodingKey::from_secret(secret.as_ref().as_bytes());
    Ok(encode(&Header::default(), &claims, &key)?)
}

/// Builds the canonical request string hashed into the `qsh` claim.
#[must_use]
pub fn canonical_request(method: HttpMethod, path_and_query: &str, context_path: &str) -> String {
    let (path, query) = path_and_query
        .split_once('?')
        .unwrap_or((path_and_query, ""));

    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        canonical_path(path, context_path),
        canonical_query(query)
    )
}

/// Returns the lowercase hex SHA-256 digest of a canonical request.
#[must_use]
pub fn query_string_hash(canonical: &str) -> String {
    let digest = Sha256::digest(canonical.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

fn canonical_path(path: &str, context_path: &str) -> String {
    let path = if context_path.is_empty() {
        path
    } else {
        path.strip_prefix(context_path).unwrap_or(path)
    };
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed.replace('&', "%26"))
    }
}

fn canonical_query(query: &str) -> String {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(key);
        if key == "jwt" {
            continue;
        }
        params.entry(key).or_default().push(decode(value));
    }

    params
        .into_iter()
        .map(|(key, mut values)| {
            values.sort();
            let values: Vec<String> = values
                .iter()
                .map(|v| urlencoding::encode(v).into_owned())
                .collect();
            format!("{}={}", urlencoding::encode(&key), values.join(","))
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw).map_or(raw.clone(), std::borrow::Cow::into_owned)
}
