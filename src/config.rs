//! Configuration for the Intercom client.
//!
//! Configuration can be built in code with [`Config::new`] or loaded from
//! environment variables with [`Config::from_env`].

use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::IntercomError;

/// Default API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.intercom.io/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for connecting to the Intercom API.
///
/// The API key is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Application id, used as the basic auth username.
    pub app_id: String,

    /// API key, used as the basic auth password.
    /// This value must never be logged or included in error messages.
    api_key: String,

    /// Base URL every resource path is joined onto. Always ends with `/`.
    pub api_endpoint: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Creates a configuration with the default endpoint and timeout.
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the API endpoint (useful for tests or proxies).
    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `INTERCOM_APP_ID`: The application id
    /// - `INTERCOM_API_KEY`: The API key
    ///
    /// # Optional Environment Variables
    ///
    /// - `INTERCOM_API_ENDPOINT`: Override of the API base URL
    /// - `INTERCOM_TIMEOUT_SECS`: Request timeout in seconds (default 10)
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::Config` if a required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, IntercomError> {
        let app_id = Self::get_required_env("INTERCOM_APP_ID")?;
        let api_key = Self::get_required_env("INTERCOM_API_KEY")?;

        let mut config = Config::new(app_id, api_key);

        if let Some(endpoint) = Self::get_optional_env("INTERCOM_API_ENDPOINT") {
            config = config.with_api_endpoint(endpoint);
        }

        if let Some(secs) = Self::get_optional_env("INTERCOM_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                IntercomError::invalid_config("INTERCOM_TIMEOUT_SECS must be a whole number")
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()
    }

    /// Validates the configuration and normalizes the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::Config` when a credential is blank or looks
    /// like a placeholder, when the endpoint is not an http(s) URL, or when
    /// the timeout is zero.
    pub fn validate(mut self) -> Result<Self, IntercomError> {
        if self.app_id.trim().is_empty() {
            return Err(IntercomError::invalid_config("app id must not be empty"));
        }
        if self.api_key.trim().is_empty() {
            return Err(IntercomError::invalid_config("API key must not be empty"));
        }
        Self::validate_api_key(&self.api_key)?;
        self.api_endpoint = Self::validate_api_endpoint(&self.api_endpoint)?;
        if self.timeout.is_zero() {
            return Err(IntercomError::invalid_config("timeout must be greater than zero"));
        }
        Ok(self)
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, IntercomError> {
        env::var(name)
            .map_err(|_| IntercomError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(IntercomError::missing_env(name))
                } else {
                    Ok(value.trim().to_string())
                }
            })
    }

    fn get_optional_env(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Validates the endpoint URL and makes sure it ends with a slash so
    /// resource paths join underneath it.
    fn validate_api_endpoint(endpoint: &str) -> Result<String, IntercomError> {
        let endpoint = endpoint.trim();
        let url = Url::parse(endpoint).map_err(|e| {
            IntercomError::invalid_config(format!("invalid API endpoint: {}", e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(IntercomError::invalid_config(
                "API endpoint must start with http:// or https://",
            ));
        }

        let mut normalized = url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        Ok(normalized)
    }

    /// Validates the API key is not a placeholder value.
    fn validate_api_key(key: &str) -> Result<(), IntercomError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = [
            "your_api_key",
            "your_key",
            "placeholder",
            "changeme",
        ];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(IntercomError::invalid_config(
                    "API key appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("api_key", &"[REDACTED]")
            .field("api_endpoint", &self.api_endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = Config::new("app", "key");
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_validate_api_endpoint_adds_trailing_slash() {
        let result = Config::validate_api_endpoint("http://localhost:8080/v1").unwrap();
        assert_eq!(result, "http://localhost:8080/v1/");
    }

    #[test]
    fn test_validate_api_endpoint_keeps_root() {
        let result = Config::validate_api_endpoint("https://api.intercom.io").unwrap();
        assert_eq!(result, "https://api.intercom.io/");
    }

    #[test]
    fn test_validate_api_endpoint_requires_http_scheme() {
        assert!(Config::validate_api_endpoint("ftp://example.com").is_err());
        assert!(Config::validate_api_endpoint("example.com").is_err());
    }

    #[test]
    fn test_validate_api_key_rejects_placeholder() {
        assert!(Config::validate_api_key("your_api_key_here").is_err());
    }

    #[test]
    fn test_validate_api_key_accepts_real_key() {
        assert!(Config::validate_api_key("abc123def456").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_app_id() {
        let err = Config::new("  ", "abc123").validate().unwrap_err();
        assert!(err.to_string().contains("app id"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let result = Config::new("app", "abc123")
            .with_timeout(Duration::ZERO)
            .validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new("app", "secret_value_987");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret_value_987"));
        assert!(debug.contains("[REDACTED]"));
    }
}
