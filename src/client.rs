//! HTTP client for the Intercom REST API.
//!
//! This module provides [`IntercomClient`] and its generic request
//! dispatcher. Resource operations (users, companies, tags, ...) live in
//! [`crate::endpoints`] as further `impl IntercomClient` blocks, and all of
//! them funnel through [`IntercomClient::call`].
//!
//! # Status mapping
//!
//! Non-success responses are translated into [`IntercomError`]:
//! - 401: `Authentication`
//! - 404: `ResourceNotFound`
//! - 502: `BadGateway`
//! - 503/504: `ServiceUnavailable`
//! - 400, 402, 403, 405, 406, 408, 409, 415, 422, 429, 500: `Server`
//! - anything else: `HttpStatus`
//!
//! # Security
//!
//! The API key is never logged. Error bodies are sanitized before they are
//! attached to an error.

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::error::IntercomError;
use crate::models::{Page, User, UserQuery};

/// User agent sent with every request.
const USER_AGENT_VALUE: &str = concat!("intercom-rust/", env!("CARGO_PKG_VERSION"));

/// Accept header sent with every request.
const ACCEPT_VALUE: &str = "application/json";

/// Maximum length of a response body attached to an error.
const MAX_ERROR_BODY_LEN: usize = 500;

/// HTTP client for the Intercom API.
///
/// Handles authentication, request formatting, and status mapping for all
/// resource operations. Cloning is cheap; clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// let config = Config::new("app-id", "api-key");
/// let client = IntercomClient::new(&config)?;
///
/// let user = client.find_user(&UserIdentity::by_email("ben@example.com")).await?;
/// ```
#[derive(Clone)]
pub struct IntercomClient {
    /// The underlying HTTP client.
    http: Client,

    /// Base URL every resource path is joined onto.
    endpoint: Url,

    /// Basic auth username.
    app_id: String,

    /// Basic auth password.
    /// SECURITY: Never log this value!
    api_key: String,

    /// Timeout applied by `http`, kept for error reporting.
    timeout: Duration,
}

impl std::fmt::Debug for IntercomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntercomClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("app_id", &self.app_id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl IntercomClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::Config` if the configuration is invalid and
    /// `IntercomError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, IntercomError> {
        let config = config.clone().validate()?;

        let endpoint = Url::parse(&config.api_endpoint).map_err(|e| {
            IntercomError::invalid_config(format!("invalid API endpoint: {}", e))
        })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(IntercomError::HttpClient)?;

        Ok(Self {
            http,
            endpoint,
            app_id: config.app_id.clone(),
            api_key: config.api_key().to_string(),
            timeout: config.timeout,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Tests connectivity and credentials by fetching a single user.
    ///
    /// Returns that first page so callers can read totals without a second
    /// request.
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::ConnectionTest` with a hint about what to
    /// check when the request fails.
    pub async fn test_connection(&self) -> Result<Page<User>, IntercomError> {
        tracing::debug!("Testing connection to Intercom API");

        match self.list_users(&UserQuery::new().page(1).per_page(1)).await {
            Ok(page) => {
                tracing::info!("Connection test successful");
                Ok(page)
            }
            Err(IntercomError::Authentication { .. }) => Err(IntercomError::connection_test(
                "authentication failed - verify INTERCOM_APP_ID and INTERCOM_API_KEY",
            )),
            Err(IntercomError::Timeout { duration, .. }) => {
                Err(IntercomError::connection_test(format!(
                    "connection timed out after {:?} - verify INTERCOM_API_ENDPOINT is reachable",
                    duration
                )))
            }
            Err(IntercomError::Http(e)) => {
                let message = IntercomError::sanitize_message(&e.to_string(), &self.api_key);
                Err(IntercomError::connection_test(format!(
                    "HTTP error: {} - verify INTERCOM_API_ENDPOINT is correct",
                    message
                )))
            }
            Err(e) => Err(IntercomError::connection_test(
                e.sanitized_display(&self.api_key),
            )),
        }
    }

    /// Sends a request to the API and returns the decoded JSON response.
    ///
    /// For `GET`, `params` must be a JSON object and becomes the query
    /// string (null values are dropped). For every other method `params`
    /// is sent as a JSON body. A blank response body decodes to
    /// `Value::Null`.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - Resource path relative to the endpoint (e.g. `users/notes`)
    /// * `params` - Optional request parameters
    ///
    /// # Errors
    ///
    /// Returns the mapped error for non-success statuses, `Timeout` when the
    /// request exceeds the configured timeout, and `Serialization` if the
    /// body is not valid JSON.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        params: Option<Value>,
    ) -> Result<Value, IntercomError> {
        let url = self.url_for(path)?;

        tracing::debug!(method = %method, path = %path, "Making Intercom API request");

        let mut req = self
            .http
            .request(method.clone(), url)
            .basic_auth(&self.app_id, Some(&self.api_key))
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, ACCEPT_VALUE);

        if let Some(params) = params {
            if method == Method::GET {
                req = req.query(&query_pairs(&params)?);
            } else {
                req = req.json(&params);
            }
        }

        let response = req
            .send()
            .await
            .map_err(|e| self.transport_error(e, &method, path))?;
        let status = response.status();

        // The client timeout also covers reading the body.
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, &method, path))?;

        if !status.is_success() {
            return Err(self.handle_http_error(status, body));
        }

        tracing::trace!(body = %body, "Intercom API response");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(IntercomError::Serialization)
    }

    /// Makes a GET request.
    pub(crate) async fn get(&self, path: &str, params: Value) -> Result<Value, IntercomError> {
        self.call(Method::GET, path, Some(params)).await
    }

    /// Makes a POST request.
    pub(crate) async fn post(&self, path: &str, params: Value) -> Result<Value, IntercomError> {
        self.call(Method::POST, path, Some(params)).await
    }

    /// Makes a PUT request.
    pub(crate) async fn put(&self, path: &str, params: Value) -> Result<Value, IntercomError> {
        self.call(Method::PUT, path, Some(params)).await
    }

    /// Makes a DELETE request.
    pub(crate) async fn delete(&self, path: &str, params: Value) -> Result<Value, IntercomError> {
        self.call(Method::DELETE, path, Some(params)).await
    }

    fn url_for(&self, path: &str) -> Result<Url, IntercomError> {
        self.endpoint
            .join(path.trim_start_matches('/'))
            .map_err(|e| IntercomError::validation(format!("invalid resource path {:?}: {}", path, e)))
    }

    fn transport_error(&self, e: reqwest::Error, method: &Method, path: &str) -> IntercomError {
        if e.is_timeout() {
            return IntercomError::timeout(self.timeout, format!("{} {}", method, path));
        }
        IntercomError::Http(e)
    }

    /// Converts a non-success response into an `IntercomError`.
    fn handle_http_error(&self, status: StatusCode, body: String) -> IntercomError {
        let body = IntercomError::sanitize_message(&body, &self.api_key);
        let body = truncate_body(body);

        if status.is_server_error() {
            tracing::warn!(status = %status, "Intercom API returned a server error");
        }

        map_status(status, body)
    }
}

/// Maps an HTTP status and (already sanitized) body onto the error taxonomy.
fn map_status(status: StatusCode, body: String) -> IntercomError {
    let body_opt = if body.trim().is_empty() {
        None
    } else {
        Some(body.clone())
    };

    match status.as_u16() {
        401 => IntercomError::Authentication {
            message: "Invalid API key/username provided.".to_string(),
            body: body_opt,
        },
        404 => IntercomError::ResourceNotFound {
            message: "Not found.".to_string(),
            body: body_opt,
        },
        502 => IntercomError::BadGateway {
            message: "Bad gateway.".to_string(),
            body: body_opt,
        },
        503 | 504 => IntercomError::ServiceUnavailable {
            status,
            message: "Service unavailable.".to_string(),
            body: body_opt,
        },
        code => match server_error_message(code) {
            Some(message) => IntercomError::Server {
                status,
                message: message.to_string(),
                body: body_opt,
            },
            None => IntercomError::HttpStatus { status, body },
        },
    }
}

/// Messages for the statuses reported as `IntercomError::Server`.
fn server_error_message(code: u16) -> Option<&'static str> {
    let message = match code {
        400 => "Bad Request – General client error, possibly malformed data.",
        402 => "Payment Required – The API is not available on your current plan.",
        403 => "Forbidden – The request is not allowed.",
        405 => "Method Not Allowed – The resource does not accept the HTTP method.",
        406 => "Not Acceptable – The resource cannot return the client's required content type.",
        408 => "Request Timeout – The server would not wait any longer for the client.",
        409 => "Conflict - the client is trying to update with a stale version or data.",
        415 => "Unsupported Media Type - The server doesn't accept the submitted content-type.",
        422 => "Unprocessable Entity – The data was well-formed but invalid.",
        429 => {
            "Too Many Requests – The client has reached or exceeded a rate limit, or the server is overloaded."
        }
        500 => "Server error.",
        _ => return None,
    };
    Some(message)
}

/// Truncates an error body so verbose upstream responses stay readable.
fn truncate_body(body: String) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_LEN) {
        Some((idx, _)) => format!("{}...[truncated]", &body[..idx]),
        None => body,
    }
}

/// Flattens a JSON object into query string pairs.
///
/// Null values are skipped, scalars are rendered as-is and nested arrays or
/// objects are JSON-encoded.
fn query_pairs(params: &Value) -> Result<Vec<(String, String)>, IntercomError> {
    let map = match params {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(IntercomError::validation(
                "GET parameters must be a JSON object",
            ))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => serde_json::to_string(other)?,
        };
        pairs.push((key.clone(), rendered));
    }
    Ok(pairs)
}
