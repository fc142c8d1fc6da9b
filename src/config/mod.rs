//! Client configuration types.
//!
//! This module provides the configuration used to point the HTTP transport
//! at a tracker instance and to derive the REST base path every resource
//! URL starts with.
//!
//! # Overview
//!
//! - [`ClientConfig`]: The configuration struct
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`SiteUrl`]: A validated site URL
//! - [`Username`], [`ApiToken`], [`AccessToken`], [`SharedSecret`]: credential newtypes
//! - [`ApiVersion`]: The REST API version segment
//!
//! # Example
//!
//! ```rust
//! use tracker_rest::{ClientConfig, SiteUrl, ApiVersion};
//!
//! let config = ClientConfig::builder()
//!     .site(SiteUrl::new("https://tracker.example.com").unwrap())
//!     .context_path("/jira")
//!     .api_version(ApiVersion::V2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.rest_base_path(), "/jira/rest/api/2");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, ApiToken, SharedSecret, SiteUrl, Username};
pub use version::ApiVersion;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Configuration for the HTTP transport.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    site: SiteUrl,
    context_path: String,
    api_version: ApiVersion,
    rest_base_path: String,
    credentials: Credentials,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the site URL.
    #[must_use]
    pub const fn site(&self) -> &SiteUrl {
        &self.site
    }

    /// Returns the context path the application is mounted under (may be empty).
    #[must_use]
    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    /// Returns the REST API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the path prefix of every REST resource (e.g., `/rest/api/2`).
    #[must_use]
    pub fn rest_base_path(&self) -> &str {
        &self.rest_base_path
    }

    /// Returns the request credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// The only required field is `site`.
///
/// # Defaults
///
/// - `context_path`: empty
/// - `api_version`: [`ApiVersion::V2`]
/// - `rest_base_path`: `{context_path}/rest/api/{api_version}`
/// - `credentials`: [`Credentials::Anonymous`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    site: Option<SiteUrl>,
    context_path: Option<String>,
    api_version: Option<ApiVersion>,
    rest_base_path: Option<String>,
    credentials: Option<Credentials>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with all fields unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site URL (required).
    #[must_use]
    pub fn site(mut self, site: SiteUrl) -> Self {
        self.site = Some(site);
        self
    }

    /// Sets the context path, e.g. `/jira`.
    #[must_use]
    pub fn context_path(mut self, path: impl Into<String>) -> Self {
        self.context_path = Some(path.into());
        self
    }

    /// Sets the REST API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Overrides the derived REST base path.
    #[must_use]
    pub fn rest_base_path(mut self, path: impl Into<String>) -> Self {
        self.rest_base_path = Some(path.into());
        self
    }

    /// Sets the request credentials.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `site` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let site = self
            .site
            .ok_or(ConfigError::MissingRequiredField { field: "site" })?;

        let context_path = self
            .context_path
            .as_deref()
            .map(normalize_path)
            .unwrap_or_default();
        let api_version = self.api_version.unwrap_or_default();
        let rest_base_path = self.rest_base_path.as_deref().map_or_else(
            || format!("{context_path}/rest/api/{api_version}"),
            normalize_path,
        );

        Ok(ClientConfig {
            site,
            context_path,
            api_version,
            rest_base_path,
            credentials: self.credentials.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

/// Ensures a leading `/` and strips trailing ones; blank input becomes empty.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteUrl {
        SiteUrl::new("https://tracker.example.com").unwrap()
    }

    #[test]
    fn test_builder_requires_site() {
        let result = ClientConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "site" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder().site(site()).build().unwrap();

        assert_eq!(config.context_path(), "");
        assert_eq!(config.api_version(), &ApiVersion::V2);
        assert_eq!(config.rest_base_path(), "/rest/api/2");
        assert!(matches!(config.credentials(), Credentials::Anonymous));
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_context_path_is_normalized_into_base_path() {
        let config = ClientConfig::builder()
            .site(site())
            .context_path("jira/")
            .api_version(ApiVersion::Latest)
            .build()
            .unwrap();

        assert_eq!(config.context_path(), "/jira");
        assert_eq!(config.rest_base_path(), "/jira/rest/api/latest");
    }

    #[test]
    fn test_rest_base_path_override_wins() {
        let config = ClientConfig::builder()
            .site(site())
            .context_path("/jira")
            .rest_base_path("/rest/agile/1.0/")
            .build()
            .unwrap();

        assert_eq!(config.rest_base_path(), "/rest/agile/1.0");
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = ClientConfig::builder()
            .site(site())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.site(), config.site());
        assert_eq!(cloned.user_agent_prefix(), Some("MyApp/1.0"));

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ClientConfig"));
    }
}
