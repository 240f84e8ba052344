//! Dictionary-backed storage shared by every resource record.
//!
//! The API returns loosely structured objects whose fields vary by plan and
//! API version, so records keep the raw JSON map and expose typed accessors
//! on top of it instead of fixing a struct layout.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered string-keyed attribute map backing a resource record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `key` as a string slice when it holds a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns `key` as an owned string. Numbers are rendered, which covers
    /// ids the API sends either way.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns `key` as an integer. Numeric strings are accepted.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(value_as_i64)
    }

    /// Returns `key` as a float. Integers and numeric strings are accepted.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns `key` as a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Returns `key` as a UTC timestamp, reading epoch seconds.
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.0.get(key).and_then(from_timestamp)
    }

    /// Stores `value` under `key` as epoch seconds.
    pub fn set_timestamp(&mut self, key: &str, value: DateTime<Utc>) {
        self.set(key, to_timestamp(value));
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns true if `key` is present and not null.
    pub fn contains(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| !v.is_null())
    }

    /// Copies every field of a response object into this map.
    ///
    /// Non-object values are ignored.
    pub fn merge(&mut self, value: Value) {
        if let Value::Object(map) = value {
            self.0.extend(map);
        }
    }

    /// Builds a JSON object holding only the listed keys that are set.
    pub fn select(&self, keys: &[&str]) -> Value {
        let map = keys
            .iter()
            .filter_map(|&key| match self.0.get(key) {
                Some(v) if !v.is_null() => Some((key.to_string(), v.clone())),
                _ => None,
            })
            .collect();
        Value::Object(map)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the underlying JSON map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the attributes, returning them as a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Value> for Attributes {
    /// Objects keep their fields; any other value yields an empty map.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// Common behaviour of dictionary-backed resource records.
pub trait Resource: Sized {
    /// Returns the backing attributes.
    fn attributes(&self) -> &Attributes;

    /// Returns the backing attributes mutably.
    fn attributes_mut(&mut self) -> &mut Attributes;

    /// Wraps an attribute map.
    fn from_attributes(attributes: Attributes) -> Self;

    /// Wraps a decoded API response.
    fn from_value(value: Value) -> Self {
        Self::from_attributes(Attributes::from(value))
    }

    /// Absorbs a response into this record, overwriting existing fields.
    fn merge(&mut self, value: Value) {
        self.attributes_mut().merge(value);
    }

    /// Returns the raw value of an attribute.
    fn get(&self, key: &str) -> Option<&Value> {
        self.attributes().get(key)
    }

    /// Sets an arbitrary attribute.
    fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes_mut().set(key, value);
    }
}

/// Reads an epoch-seconds value (number or numeric string) as a UTC time.
pub fn from_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let secs = value_as_i64(value)?;
    Utc.timestamp_opt(secs, 0).single()
}

/// Converts a UTC time into epoch seconds.
pub fn to_timestamp(value: DateTime<Utc>) -> i64 {
    value.timestamp()
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_getters() {
        let attrs = Attributes::from(json!({
            "name": "Ben",
            "session_count": 12,
            "monthly_spend": "155.5",
            "unsubscribed_from_emails": false,
        }));

        assert_eq!(attrs.get_str("name"), Some("Ben"));
        assert_eq!(attrs.get_i64("session_count"), Some(12));
        assert_eq!(attrs.get_f64("monthly_spend"), Some(155.5));
        assert_eq!(attrs.get_bool("unsubscribed_from_emails"), Some(false));
        assert_eq!(attrs.get_str("session_count"), None);
        assert_eq!(attrs.get_i64("missing"), None);
        assert_eq!(attrs.get_string("session_count").as_deref(), Some("12"));
    }

    #[test]
    fn test_timestamp_from_number_and_string() {
        let attrs = Attributes::from(json!({
            "created_at": 1270000000,
            "updated_at": "1300000000",
            "bogus": "yesterday",
        }));

        assert_eq!(attrs.timestamp("created_at").unwrap().timestamp(), 1270000000);
        assert_eq!(attrs.timestamp("updated_at").unwrap().timestamp(), 1300000000);
        assert!(attrs.timestamp("bogus").is_none());
    }

    #[test]
    fn test_set_timestamp_stores_epoch_seconds() {
        let mut attrs = Attributes::new();
        let when = Utc.timestamp_opt(1400000000, 0).unwrap();
        attrs.set_timestamp("created_at", when);
        assert_eq!(attrs.get("created_at"), Some(&json!(1400000000)));
    }

    #[test]
    fn test_non_object_value_is_empty() {
        assert!(Attributes::from(Value::Null).is_empty());
        assert!(Attributes::from(json!("")).is_empty());
    }

    #[test]
    fn test_merge_overwrites_fields() {
        let mut attrs = Attributes::from(json!({ "name": "Old", "plan": "free" }));
        attrs.merge(json!({ "name": "New", "id": "42" }));
        assert_eq!(attrs.get_str("name"), Some("New"));
        assert_eq!(attrs.get_str("plan"), Some("free"));
        assert_eq!(attrs.get_str("id"), Some("42"));
    }

    #[test]
    fn test_select_skips_missing_and_null() {
        let attrs = Attributes::from(json!({ "name": "Acme", "plan": null, "id": "1" }));
        let selected = attrs.select(&["name", "plan", "monthly_spend"]);
        assert_eq!(selected, json!({ "name": "Acme" }));
    }

    #[test]
    fn test_contains_ignores_null() {
        let attrs = Attributes::from(json!({ "email": null, "user_id": "7" }));
        assert!(!attrs.contains("email"));
        assert!(attrs.contains("user_id"));
    }
}
