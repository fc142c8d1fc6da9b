//! Request credentials.
//!
//! This module turns configured [`Credentials`] into the `Authorization`
//! header attached to each outgoing request.
//!
//! # Overview
//!
//! - [`Credentials::Anonymous`]: no header
//! - [`Credentials::Basic`]: `Basic base64(username:api_token)`
//! - [`Credentials::Bearer`]: `Bearer <token>`
//! - [`Credentials::Jwt`]: a per-request token bound to the method, path and
//!   query via a query string hash, see [`jwt`]
//!
//! # Example
//!
//! ```rust
//! use tracker_rest::{ApiToken, Credentials, HttpMethod, Username};
//!
//! let credentials = Credentials::basic(
//!     Username::new("alice").unwrap(),
//!     ApiToken::new("token").unwrap(),
//! );
//! let header = credentials
//!     .authorization(HttpMethod::Get, "/rest/api/2/issue/1", "")
//!     .unwrap();
//! assert_eq!(header.as_deref(), Some("Basic YWxpY2U6dG9rZW4="));
//! ```

pub mod jwt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::clients::{HttpError, HttpMethod};
use crate::config::{AccessToken, ApiToken, SharedSecret, Username};

/// Credentials attached to every request sent by the HTTP transport.
#[derive(Clone, Debug, Default)]
pub enum Credentials {
    /// Send no `Authorization` header.
    #[default]
    Anonymous,
    /// HTTP basic authentication.
    Basic {
        /// The account name.
        username: Username,
        /// The API token or password.
        api_token: ApiToken,
    },
    /// A bearer access token.
    Bearer(AccessToken),
    /// Per-request JWT signed with a shared secret.
    Jwt {
        /// The `iss` claim, usually the installed app key.
        issuer: String,
        /// The HS256 signing secret.
        shared_secret: SharedSecret,
    },
}

impl Credentials {
    /// Convenience constructor for [`Credentials::Basic`].
    #[must_use]
    pub const fn basic(username: Username, api_token: ApiToken) -> Self {
        Self::Basic {
            username,
            api_token,
        }
    }

    /// Convenience constructor for [`Credentials::Jwt`].
    #[must_use]
    pub fn jwt(issuer: impl Into<String>, shared_secret: SharedSecret) -> Self {
        Self::Jwt {
            issuer: issuer.into(),
            shared_secret,
        }
    }

    /// Returns the `Authorization` header value for a request, if any.
    ///
    /// `path_and_query` is the site-relative request target and
    /// `context_path` is stripped from it before a JWT query hash is computed.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Signing`] if a JWT cannot be encoded.
    pub fn authorization(
        &self,
        method: HttpMethod,
        path_and_query: &str,
        context_path: &str,
    ) -> Result<Option<String>, HttpError> {
        match self {
            Self::Anonymous => Ok(None),
            Self::Basic {
                username,
                api_token,
            } => {
                let pair = format!("{}:{}", username.as_ref(), api_token.as_ref());
                Ok(Some(format!("Basic {}", STANDARD.encode(pair))))
            }
            Self::Bearer(token) => Ok(Some(format!("Bearer {}", token.as_ref()))),
            Self::Jwt {
                issuer,
                shared_secret,
            } => {
                let token = jwt::sign_request(
                    issuer,
                    shared_secret,
                    method,
                    path_and_query,
                    context_path,
                    chrono::Utc::now(),
                )?;
                Ok(Some(format!("JWT {token}")))
            }
        }
    }
}
