//! Common types shared across Intercom resources.
//!
//! This module defines user identification and the pagination wrapper
//! returned by list endpoints.

use serde::Serialize;
use serde_json::Value;

use super::{Attributes, Resource};
use crate::error::IntercomError;

/// Identifies a user by email and/or by the application-defined user id.
///
/// Most user-scoped endpoints accept either identifier; at least one is
/// required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    /// The user's email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The application-defined user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl UserIdentity {
    /// Identifies a user by email.
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            user_id: None,
        }
    }

    /// Identifies a user by user id.
    pub fn by_user_id(user_id: impl Into<String>) -> Self {
        Self {
            email: None,
            user_id: Some(user_id.into()),
        }
    }

    /// Adds an email to the identity.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds a user id to the identity.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Checks that at least one non-blank identifier is present.
    pub fn validate(&self) -> Result<(), IntercomError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if present(&self.email) || present(&self.user_id) {
            Ok(())
        } else {
            Err(IntercomError::validation(
                "an email or user_id is required to identify a user",
            ))
        }
    }

    /// Renders the identity as request parameters.
    pub(crate) fn to_params(&self) -> serde_json::Map<String, Value> {
        let mut params = serde_json::Map::new();
        if let Some(email) = &self.email {
            params.insert("email".to_string(), Value::String(email.clone()));
        }
        if let Some(user_id) = &self.user_id {
            params.insert("user_id".to_string(), Value::String(user_id.clone()));
        }
        params
    }
}

/// One page of a paginated list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records on this page.
    pub items: Vec<T>,

    /// Total number of records across all pages.
    pub total_count: Option<i64>,

    /// The page number of this page.
    pub page: Option<i64>,

    /// The next page number, if any.
    pub next_page: Option<i64>,

    /// The previous page number, if any.
    pub previous_page: Option<i64>,

    /// Total number of pages.
    pub total_pages: Option<i64>,
}

impl<T: Resource> Page<T> {
    /// Parses a list response whose records live under `items_key`.
    ///
    /// Pagination fields are read from the top level first and then from a
    /// nested `pages` object.
    pub fn from_response(value: Value, items_key: &str) -> Self {
        let attrs = Attributes::from(value);
        let pages = attrs
            .get("pages")
            .cloned()
            .map(Attributes::from)
            .unwrap_or_default();

        let field = |key: &str| attrs.get_i64(key).or_else(|| pages.get_i64(key));

        let items = attrs
            .get(items_key)
            .and_then(Value::as_array)
            .map(|arr| arr.iter().cloned().map(T::from_value).collect())
            .unwrap_or_default();

        Self {
            items,
            total_count: field("total_count"),
            page: field("page"),
            next_page: attrs.get_i64("next_page"),
            previous_page: attrs.get_i64("previous_page"),
            total_pages: field("total_pages"),
        }
    }
}

impl<T> Page<T> {
    /// Returns true if no records were returned.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
