//! Error types for the Intercom client.
//!
//! This module defines `IntercomError`, the unified error type returned by
//! every client operation. HTTP status codes returned by the API are mapped
//! onto a small, fixed set of categories (authentication, not found, server,
//! bad gateway, service unavailable).
//!
//! # Security
//!
//! Error messages are sanitized so the API key never leaks into logs or
//! error output. Use `sanitize_message()` when building messages from
//! external sources.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for all Intercom operations.
#[derive(Error, Debug)]
pub enum IntercomError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The API rejected the credentials (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication {
        /// Human-readable description of the failure.
        message: String,
        /// The response body, if any.
        body: Option<String>,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("resource not found: {message}")]
    ResourceNotFound {
        /// Human-readable description of the failure.
        message: String,
        /// The response body, if any.
        body: Option<String>,
    },

    /// The API returned an error other than auth or not found.
    #[error("server error ({status}): {message}")]
    Server {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// Human-readable description of the failure.
        message: String,
        /// The response body, if any.
        body: Option<String>,
    },

    /// The request did not reach the API (HTTP 502).
    #[error("bad gateway: {message}")]
    BadGateway {
        /// Human-readable description of the failure.
        message: String,
        /// The response body, if any.
        body: Option<String>,
    },

    /// The API cannot handle the request right now (HTTP 503/504).
    #[error("service unavailable ({status}): {message}")]
    ServiceUnavailable {
        /// The specific status code.
        status: reqwest::StatusCode,
        /// Human-readable description of the failure.
        message: String,
        /// The response body, if any.
        body: Option<String>,
    },

    /// HTTP response returned a non-success status with no known mapping.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body.
        body: String,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} - the API may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl IntercomError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        IntercomError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        IntercomError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        IntercomError::Validation(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        IntercomError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        IntercomError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code behind this error, if it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            IntercomError::Authentication { .. } => Some(reqwest::StatusCode::UNAUTHORIZED),
            IntercomError::ResourceNotFound { .. } => Some(reqwest::StatusCode::NOT_FOUND),
            IntercomError::BadGateway { .. } => Some(reqwest::StatusCode::BAD_GATEWAY),
            IntercomError::Server { status, .. }
            | IntercomError::ServiceUnavailable { status, .. }
            | IntercomError::HttpStatus { status, .. } => Some(*status),
            IntercomError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the response body attached to a status-mapped error.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            IntercomError::Authentication { body, .. }
            | IntercomError::ResourceNotFound { body, .. }
            | IntercomError::Server { body, .. }
            | IntercomError::BadGateway { body, .. }
            | IntercomError::ServiceUnavailable { body, .. } => body.as_deref(),
            IntercomError::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if the API reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, IntercomError::ResourceNotFound { .. })
    }

    /// Sanitizes an error message to remove any occurrence of the API key.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `api_key` - The API key to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the API key replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_key)
    }
}
