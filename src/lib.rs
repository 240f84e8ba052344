//! # Intercom
//!
//! An async client for the Intercom customer-messaging REST API.
//!
//! Resources (users, companies, tags, message threads, notes, impressions
//! and events) are exposed as dictionary-backed records with typed
//! accessors, and every operation is a method on [`IntercomClient`].
//!
//! ## Architecture
//!
//! - [`config`] - Credentials, endpoint and timeout, from code or the environment
//! - [`error`] - The error taxonomy HTTP statuses are mapped onto
//! - [`client`] - The request dispatcher (basic auth, headers, status mapping)
//! - [`endpoints`] - Resource operations, one module per resource
//! - [`models`] - Resource records and custom data validation
//!
//! ## Configuration
//!
//! [`Config::from_env`](config::Config::from_env) reads:
//!
//! - `INTERCOM_APP_ID`: Application id (basic auth username)
//! - `INTERCOM_API_KEY`: API key (basic auth password)
//! - `INTERCOM_API_ENDPOINT` (optional): defaults to `https://api.intercom.io/`
//! - `INTERCOM_TIMEOUT_SECS` (optional): defaults to 10
//!
//! ## Security Considerations
//!
//! The API key is kept in memory only, is never logged, is redacted from
//! `Debug` output and is stripped from error bodies.
//!
//! ## Example
//!
//! ```no_run
//! use intercom::{Config, IntercomClient, UserIdentity};
//!
//! # async fn example() -> Result<(), intercom::IntercomError> {
//! let client = IntercomClient::new(&Config::new("app-id", "api-key"))?;
//!
//! let user = client
//!     .find_user(&UserIdentity::by_email("ben@example.com"))
//!     .await?;
//! println!("{:?} has {} sessions", user.name(), user.session_count());
//!
//! let note = client
//!     .create_note(&UserIdentity::by_email("ben@example.com"), "Called about billing")
//!     .await?;
//! println!("{}", note.display_content());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::IntercomClient;
pub use config::Config;
pub use error::IntercomError;
pub use models::*;
