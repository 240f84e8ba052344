//! Event records.
//!
//! Events record something a user did, with optional metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Attributes, Resource, UserIdentity};
use crate::error::IntercomError;

/// An activity performed by a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    attrs: Attributes,
}

impl Resource for Event {
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

impl Event {
    /// Creates an event with the given name for the identified user.
    pub fn new(event_name: impl Into<String>, identity: &UserIdentity) -> Self {
        let mut attrs = Attributes::from(identity.to_params());
        attrs.set("event_name", event_name.into());
        Self { attrs }
    }

    /// The event name.
    pub fn event_name(&self) -> Option<&str> {
        self.attrs.get_str("event_name")
    }

    /// When the event happened.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp("created")
    }

    /// Sets when the event happened. Defaults to the time it is sent.
    pub fn set_created(&mut self, value: DateTime<Utc>) {
        self.attrs.set_timestamp("created", value);
    }

    /// The application-defined user id.
    pub fn user_id(&self) -> Option<String> {
        self.attrs.get_string("user_id")
    }

    /// The user's email.
    pub fn email(&self) -> Option<&str> {
        self.attrs.get_str("email")
    }

    /// Metadata attached to the event.
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.attrs.get("metadata").and_then(Value::as_object)
    }

    /// Replaces the metadata.
    pub fn set_metadata(&mut self, metadata: Map<String, Value>) {
        self.attrs.set("metadata", Value::Object(metadata));
    }

    /// Adds a single metadata entry.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let mut metadata = self.metadata().cloned().unwrap_or_default();
        metadata.insert(key.into(), value.into());
        self.set_metadata(metadata);
    }

    /// Builds the request body, stamping `created` with `now` when unset.
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::Validation` when the event name is missing.
    pub fn save_attributes(&self, now: DateTime<Utc>) -> Result<Value, IntercomError> {
        if self.event_name().is_none_or(|n| n.trim().is_empty()) {
            return Err(IntercomError::validation("event_name is required"));
        }

        let mut attrs = self.attrs.clone();
        if !attrs.contains("created") {
            attrs.set_timestamp("created", now);
        }
        Ok(attrs.select(&["event_name", "user_id", "email", "created", "metadata"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1400000000, 0).unwrap()
    }

    #[test]
    fn test_save_stamps_created() {
        let event = Event::new("invited-friend", &UserIdentity::by_email("ben@example.com"));
        assert_eq!(
            event.save_attributes(now()).unwrap(),
            json!({
                "event_name": "invited-friend",
                "email": "ben@example.com",
                "created": 1400000000
            })
        );
    }

    #[test]
    fn test_save_keeps_explicit_created() {
        let mut event = Event::new("signed-up", &UserIdentity::by_user_id("7"));
        event.set_created(Utc.timestamp_opt(1300000000, 0).unwrap());
        let body = event.save_attributes(now()).unwrap();
        assert_eq!(body["created"], 1300000000);
        assert_eq!(event.created().unwrap().timestamp(), 1300000000);
    }

    #[test]
    fn test_metadata_only_when_set() {
        let mut event = Event::new("ordered", &UserIdentity::by_user_id("7"));
        assert!(event.save_attributes(now()).unwrap().get("metadata").is_none());

        event.insert_metadata("order_number", "ORDER-1");
        event.insert_metadata("total", 42.5);
        let body = event.save_attributes(now()).unwrap();
        assert_eq!(body["metadata"], json!({ "order_number": "ORDER-1", "total": 42.5 }));
    }

    #[test]
    fn test_save_requires_event_name() {
        let event = Event::from_value(json!({ "email": "ben@example.com" }));
        let err = event.save_attributes(now()).unwrap_err();
        assert!(err.to_string().contains("event_name"));
    }
}
