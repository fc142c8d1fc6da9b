//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated site URL, the scheme and host every request path is joined to.
///
/// Trailing slashes are trimmed so that paths (which always start with `/`)
/// can be appended directly.
///
/// # Example
///
/// ```rust
/// use tracker_rest::SiteUrl;
///
/// let site = SiteUrl::new("https://tracker.example.com/").unwrap();
/// assert_eq!(site.as_ref(), "https://tracker.example.com");
/// assert_eq!(site.scheme(), "https");
/// assert_eq!(site.host_name(), "tracker.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl SiteUrl {
    /// Creates a new validated site URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSiteUrl`] if the URL has no scheme
    /// or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidSiteUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidSiteUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidSiteUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidSiteUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name without port or path.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for SiteUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for SiteUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A non-empty account name used for basic authentication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new username.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the value is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyCredential { field: "username" });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Declares a non-empty secret newtype whose `Debug` output is masked.
macro_rules! secret_newtype {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Creates a new secret value.
            ///
            /// # Errors
            ///
            /// Returns [`ConfigError::EmptyCredential`] if the value is empty.
            pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
                let secret = secret.into();
                if secret.is_empty() {
                    return Err(ConfigError::EmptyCredential { field: $field });
                }
                Ok(Self(secret))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(*****)"))
            }
        }
    };
}

secret_newtype!(
    /// An API token (or password) paired with a [`Username`] for basic authentication.
    ///
    /// ```rust
    /// use tracker_rest::ApiToken;
    ///
    /// let token = ApiToken::new("s3cr3t").unwrap();
    /// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
    /// ```
    ApiToken,
    "api_token"
);

secret_newtype!(
    /// A bearer access token.
    AccessToken,
    "access_token"
);

secret_newtype!(
    /// The shared secret used to sign JWT request tokens.
    SharedSecret,
    "shared_secret"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_url_trims_trailing_slashes() {
        let site = SiteUrl::new("https://tracker.example.com//").unwrap();
        assert_eq!(site.as_ref(), "https://tracker.example.com");
    }

    #[test]
    fn test_site_url_keeps_port() {
        let site = SiteUrl::new("http://localhost:8080").unwrap();
        assert_eq!(site.host_name(), "localhost");
        assert_eq!(site.as_ref(), "http://localhost:8080");
    }

    #[test]
    fn test_site_url_rejects_missing_scheme() {
        assert!(matches!(
            SiteUrl::new("tracker.example.com"),
            Err(ConfigError::InvalidSiteUrl { .. })
        ));
    }

    #[test]
    fn test_site_url_rejects_missing_host() {
        assert!(SiteUrl::new("https://").is_err());
        assert!(SiteUrl::new("https:///path").is_err());
    }

    #[test]
    fn test_site_url_serde_round_trip_validates() {
        let site: SiteUrl = serde_json::from_str(r#""https://tracker.example.com""#).unwrap();
        assert_eq!(serde_json::to_string(&site).unwrap(), r#""https://tracker.example.com""#);

        let bad: Result<SiteUrl, _> = serde_json::from_str(r#""nope""#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_username_rejects_empty_string() {
        assert!(matches!(
            Username::new(""),
            Err(ConfigError::EmptyCredential { field: "username" })
        ));
    }

    #[test]
    fn test_secrets_mask_value_in_debug() {
        let token = AccessToken::new("abc").unwrap();
        assert_eq!(format!("{token:?}"), "AccessToken(*****)");

        let secret = SharedSecret::new("xyz").unwrap();
        assert_eq!(format!("{secret:?}"), "SharedSecret(*****)");
        assert_eq!(secret.as_ref(), "xyz");
    }

    #[test]
    fn test_secrets_reject_empty_string() {
        assert!(matches!(
            ApiToken::new(""),
            Err(ConfigError::EmptyCredential { field: "api_token" })
        ));
        assert!(SharedSecret::new("").is_err());
    }
}
