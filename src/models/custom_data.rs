//! Custom data attached to users and companies.
//!
//! Custom data is a flat map whose values must be strings, real numbers or
//! booleans.
//! Values are checked on insertion; data read back from the API is taken as
//! is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::IntercomError;

const INVALID_VALUE: &str = "custom data only allows string, real number and boolean values";

/// A flat map of string keys to string, numeric or boolean values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomData(Map<String, Value>);

impl CustomData {
    /// Creates empty custom data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, rejecting anything that is not a string, a real number
    /// or a boolean.
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::Validation` for nulls, arrays and objects.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), IntercomError> {
        let value = value.into();
        Self::check_value(&value)?;
        self.0.insert(key.into(), value);
        Ok(())
    }

    /// Builder-style variant of [`CustomData::insert`].
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, IntercomError> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Wraps a map read from the API without checking its values.
    pub(crate) fn from_map_unchecked(map: Map<String, Value>) -> Self {
        Self(map)
    }

    fn check_value(value: &Value) -> Result<(), IntercomError> {
        match value {
            Value::String(_) | Value::Bool(_) => Ok(()),
            Value::Number(n) if n.as_f64().is_some_and(f64::is_finite) => Ok(()),
            _ => Err(IntercomError::validation(INVALID_VALUE)),
        }
    }
}

impl TryFrom<Value> for CustomData {
    type Error = IntercomError;

    /// Validates every entry of a JSON object.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => {
                let mut data = CustomData::new();
                for (key, value) in map {
                    data.insert(key, value)?;
                }
                Ok(data)
            }
            Value::Null => Ok(CustomData::new()),
            _ => Err(IntercomError::validation("custom data must be a JSON object")),
        }
    }
}

impl From<CustomData> for Value {
    fn from(data: CustomData) -> Self {
        Value::Object(data.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_accepts_strings_numbers_and_booleans() {
        let mut data = CustomData::new();
        data.insert("app_name", "Genesis").unwrap();
        data.insert("monthly_spend", 155.5).unwrap();
        data.insert("seats", 3).unwrap();
        data.insert("trial", true).unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.get("trial"), Some(&json!(true)));
        assert_eq!(data.get("monthly_spend"), Some(&json!(155.5)));
    }

    #[test]
    fn test_insert_rejects_other_values() {
        let mut data = CustomData::new();
        let err = data.insert("a_dict", json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: custom data only allows string, real number and boolean values"
        );
        assert!(data.insert("list", json!([1])).is_err());
        assert!(data.insert("nothing", Value::Null).is_err());
        assert!(data.is_empty());
    }

    #[test]
    fn test_try_from_validates_every_entry() {
        let ok = CustomData::try_from(json!({ "plan": "pro", "spend": 10 })).unwrap();
        assert_eq!(ok.len(), 2);

        assert!(CustomData::try_from(json!({ "plan": "pro", "nested": { "a": 1 } })).is_err());
        assert!(CustomData::try_from(json!("not an object")).is_err());
        assert!(CustomData::try_from(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_with_builder() {
        let data = CustomData::new()
            .with("category", "Premium")
            .and_then(|d| d.with("max_monthly_spend", 200))
            .unwrap();
        assert_eq!(
            Value::from(data),
            json!({ "category": "Premium", "max_monthly_spend": 200 })
        );
    }
}
