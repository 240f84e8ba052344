//! Company records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Attributes, CustomData, Resource};
use crate::error::IntercomError;

/// Attributes sent when creating or updating a company.
pub const COMPANY_WRITABLE_ATTRIBUTES: &[&str] = &[
    "company_id",
    "name",
    "plan",
    "remote_created_at",
    "monthly_spend",
    "custom_attributes",
    "custom_data",
];

/// A company that users belong to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Company {
    attrs: Attributes,
}

impl Resource for Company {
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

impl Company {
    /// Creates an empty company.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intercom's internal id.
    pub fn id(&self) -> Option<String> {
        self.attrs.get_string("id")
    }

    /// The company id defined by the application.
    pub fn company_id(&self) -> Option<String> {
        self.attrs.get_string("company_id")
    }

    /// Sets the application-defined company id.
    pub fn set_company_id(&mut self, company_id: impl Into<String>) {
        self.attrs.set("company_id", company_id.into());
    }

    /// The company name.
    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    /// Sets the company name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.attrs.set("name", name.into());
    }

    /// The plan the company is on.
    pub fn plan(&self) -> Option<&str> {
        self.attrs.get_str("plan")
    }

    /// Sets the plan name.
    pub fn set_plan(&mut self, plan: impl Into<String>) {
        self.attrs.set("plan", plan.into());
    }

    /// Revenue the company generates.
    pub fn monthly_spend(&self) -> Option<f64> {
        self.attrs.get_f64("monthly_spend")
    }

    /// Sets the monthly spend.
    pub fn set_monthly_spend(&mut self, spend: f64) {
        self.attrs.set("monthly_spend", spend);
    }

    /// Number of users in the company.
    pub fn user_count(&self) -> Option<i64> {
        self.attrs.get_i64("user_count")
    }

    /// Number of recorded sessions. Zero when the API omits it.
    pub fn session_count(&self) -> i64 {
        self.attrs.get_i64("session_count").unwrap_or(0)
    }

    /// When the company was added to Intercom.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp("created_at")
    }

    /// When the company was created by the application.
    pub fn remote_created_at(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp("remote_created_at")
    }

    /// Sets when the company was created by the application.
    pub fn set_remote_created_at(&mut self, value: DateTime<Utc>) {
        self.attrs.set_timestamp("remote_created_at", value);
    }

    /// Custom data stored for the company.
    pub fn custom_data(&self) -> CustomData {
        match self.attrs.get("custom_data") {
            Some(Value::Object(map)) => CustomData::from_map_unchecked(map.clone()),
            _ => CustomData::new(),
        }
    }

    /// Replaces the company's custom data.
    pub fn set_custom_data(&mut self, data: CustomData) {
        self.attrs.set("custom_data", data);
    }

    /// Custom attributes stored for the company.
    pub fn custom_attributes(&self) -> CustomData {
        match self.attrs.get("custom_attributes") {
            Some(Value::Object(map)) => CustomData::from_map_unchecked(map.clone()),
            _ => CustomData::new(),
        }
    }

    /// Replaces the company's custom attributes.
    pub fn set_custom_attributes(&mut self, data: CustomData) {
        self.attrs.set("custom_attributes", data);
    }

    /// Builds the request body for create/update, holding only writable
    /// attributes that are set.
    pub fn save_attributes(&self) -> Value {
        self.attrs.select(COMPANY_WRITABLE_ATTRIBUTES)
    }
}

/// How to look up a single company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyLookup {
    /// By application-defined company id.
    CompanyId(String),
    /// By company name.
    Name(String),
}

impl CompanyLookup {
    pub(crate) fn to_params(&self) -> Result<Value, IntercomError> {
        let (key, value) = match self {
            CompanyLookup::CompanyId(id) => ("company_id", id),
            CompanyLookup::Name(name) => ("name", name),
        };
        if value.trim().is_empty() {
            return Err(IntercomError::validation(format!("{} must not be empty", key)));
        }
        Ok(serde_json::json!({ key: value }))
    }
}
