//! REST API version definitions.
//!
//! This module provides the [`ApiVersion`] enum selecting the versioned
//! segment of the REST base path (`/rest/api/{version}`).

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// REST API version.
///
/// # Example
///
/// ```rust
/// use tracker_rest::ApiVersion;
///
/// let version: ApiVersion = "3".parse().unwrap();
/// assert_eq!(version, ApiVersion::V3);
/// assert_eq!(format!("{}", ApiVersion::V2), "2");
/// assert_eq!(ApiVersion::default(), ApiVersion::V2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// Version 2, the long-lived default.
    #[default]
    V2,
    /// Version 3.
    V3,
    /// The server's `latest` alias.
    Latest,
    /// Any other numeric version.
    Custom(String),
}

impl ApiVersion {
    /// Returns `true` for versions the server resolves at request time.
    #[must_use]
    pub const fn is_floating(&self) -> bool {
        matches!(self, Self::Latest)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2 => "2",
            Self::V3 => "3",
            Self::Latest => "latest",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "2" => Ok(Self::V2),
            "3" => Ok(Self::V3),
            "latest" => Ok(Self::Latest),
            _ if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_known_versions() {
        assert_eq!("2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!(" 3 ".parse::<ApiVersion>().unwrap(), ApiVersion::V3);
        assert_eq!("LATEST".parse::<ApiVersion>().unwrap(), ApiVersion::Latest);
    }

    #[test]
    fn test_parses_other_numeric_versions_as_custom() {
        let version: ApiVersion = "4".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("4".to_string()));
        assert_eq!(version.to_string(), "4");
    }

    #[test]
    fn test_rejects_non_numeric_versions() {
        assert!(matches!(
            "2024-01".parse::<ApiVersion>(),
            Err(ConfigError::InvalidApiVersion { .. })
        ));
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_only_latest_is_floating() {
        assert!(ApiVersion::Latest.is_floating());
        assert!(!ApiVersion::V2.is_floating());
    }
}
