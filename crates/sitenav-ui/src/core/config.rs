//! Build-time configuration for the front-end.
//!
//! # Design
//! - Two knobs only: the REST base URL and an optional development token.
//! - Parse from any key lookup so tests never touch process state.
//! - The development token is dropped outright in production builds.

use thiserror::Error;
use url::Url;

/// Environment key holding the REST base URL.
pub const API_URL_KEY: &str = "SITENAV_API_URL";
/// Environment key holding the development bearer token.
pub const TEST_TOKEN_KEY: &str = "SITENAV_TEST_TOKEN";
/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Build profile used to gate development-only behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildProfile {
    /// Debug builds; honours the development token.
    Development,
    /// Release builds; ignores the development token.
    Production,
}

impl BuildProfile {
    /// Profile matching the current compilation.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

/// Errors raised while validating configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL did not parse.
    #[error("invalid API URL")]
    InvalidApiUrl {
        /// Offending value.
        value: String,
    },
    /// The base URL used a scheme other than http/https.
    #[error("unsupported API URL scheme")]
    UnsupportedScheme {
        /// Offending scheme.
        scheme: String,
    },
}

/// Validated front-end configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// REST base URL without a trailing slash.
    pub api_url: String,
    /// Bearer token that bypasses interactive login (development only).
    pub test_token: Option<String>,
    /// Profile the configuration was resolved for.
    pub profile: BuildProfile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            test_token: None,
            profile: BuildProfile::current(),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the API URL is malformed or not http(s).
    pub fn from_lookup<F>(lookup: F, profile: BuildProfile) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup(API_URL_KEY).filter(|value| !value.trim().is_empty()) {
            Some(raw) => normalize_api_url(&raw)?,
            None => DEFAULT_API_URL.to_string(),
        };
        let test_token = match profile {
            BuildProfile::Development => lookup(TEST_TOKEN_KEY)
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty()),
            BuildProfile::Production => None,
        };
        Ok(Self {
            api_url,
            test_token,
            profile,
        })
    }

    /// Resolve configuration from values captured at compile time.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the embedded API URL is invalid.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(
            |key| match key {
                API_URL_KEY => option_env!("SITENAV_API_URL").map(ToString::to_string),
                TEST_TOKEN_KEY => option_env!("SITENAV_TEST_TOKEN").map(ToString::to_string),
                _ => None,
            },
            BuildProfile::current(),
        )
    }

    /// Whether a base URL was supplied at compile time.
    #[must_use]
    pub const fn api_url_embedded() -> bool {
        option_env!("SITENAV_API_URL").is_some()
    }
}

/// Validate a base URL and strip trailing slashes.
///
/// # Errors
/// Returns [`ConfigError`] when the value is malformed or not http(s).
pub fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|_| ConfigError::InvalidApiUrl {
        value: trimmed.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        other => Err(ConfigError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[]), BuildProfile::Development).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.test_token.is_none());
    }

    #[test]
    fn api_url_is_trimmed_and_validated() {
        let config = AppConfig::from_lookup(
            lookup(&[(API_URL_KEY, " https://api.example.test/v1/ ")]),
            BuildProfile::Production,
        )
        .unwrap();
        assert_eq!(config.api_url, "https://api.example.test/v1");

        let err = AppConfig::from_lookup(lookup(&[(API_URL_KEY, "not a url")]), BuildProfile::Production)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl { .. }));

        let err = normalize_api_url("ftp://files.example.test").unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsupportedScheme {
                scheme: "ftp".into()
            }
        );
    }

    #[test]
    fn test_token_only_honoured_in_development() {
        let pairs = [(TEST_TOKEN_KEY, "dev-token")];
        let dev = AppConfig::from_lookup(lookup(&pairs), BuildProfile::Development).unwrap();
        assert_eq!(dev.test_token.as_deref(), Some("dev-token"));

        let prod = AppConfig::from_lookup(lookup(&pairs), BuildProfile::Production).unwrap();
        assert!(prod.test_token.is_none());

        let blank = AppConfig::from_lookup(lookup(&[(TEST_TOKEN_KEY, "  ")]), BuildProfile::Development)
            .unwrap();
        assert!(blank.test_token.is_none());
    }
}
