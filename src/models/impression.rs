//! Impression records.
//!
//! An impression records that a user visited the application.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Attributes, Resource};

/// The response to recording an impression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Impression {
    attrs: Attributes,
}

impl Resource for Impression {
    fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    fn from_attributes(attrs: Attributes) -> Self {
        Self { attrs }
    }
}

impl Impression {
    /// Number of messages the user has not read yet.
    pub fn unread_messages(&self) -> Option<i64> {
        self.attrs.get_i64("unread_messages")
    }
}

/// Optional details sent with an impression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpressionParams {
    /// The IP address the user visited from.
    pub user_ip: Option<String>,

    /// The user agent the user visited with.
    pub user_agent: Option<String>,

    /// The URL the user was on.
    pub location: Option<String>,
}

impl ImpressionParams {
    /// Creates empty impression details.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user's IP address.
    pub fn with_user_ip(mut self, ip: impl Into<String>) -> Self {
        self.user_ip = Some(ip.into());
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the page location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Adds the set fields to a request body.
    pub(crate) fn extend(&self, params: &mut Map<String, Value>) {
        let fields = [
            ("user_ip", &self.user_ip),
            ("user_agent", &self.user_agent),
            ("location", &self.location),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                params.insert(key.to_string(), Value::String(value.clone()));
            }
        }
    }
}
