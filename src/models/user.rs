//! User records.
//!
//! A user is a customer of the application, identified by email and/or an
//! application-defined user id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Attributes, Company, CustomData, Resource, UserIdentity};

/// Attributes sent when creating or updating a user.
pub const USER_WRITABLE_ATTRIBUTES: &[&str] = &[
    "email",
    "user_id",
    "name",
    "created_at",
    "custom_data",
    "last_seen_ip",
    "last_seen_user_agent",
    "companies",
    "last_request_at",
    "unsubscribed_from_emails",
];

/// A user of the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User {
    attrs: Attributes,
}

impl Resource for User {
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

impl User {
    /// Creates an empty user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a user carrying the given identity.
    pub fn from_identity(identity: &UserIdentity) -> Self {
        Self::from_attributes(Attributes::from(identity.to_params()))
    }

    /// Intercom's internal id.
    pub fn id(&self) -> Option<String> {
        self.attrs.get_string("id")
    }

    /// The user's email address.
    pub fn email(&self) -> Option<&str> {
        self.attrs.get_str("email")
    }

    /// Sets the email address.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.attrs.set("email", email.into());
    }

    /// The application-defined user id.
    pub fn user_id(&self) -> Option<String> {
        self.attrs.get_string("user_id")
    }

    /// Sets the application-defined user id.
    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.attrs.set("user_id", user_id.into());
    }

    /// The user's full name.
    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    /// Sets the user's full name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.attrs.set("name", name.into());
    }

    /// When the user signed up.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp("created_at")
    }

    /// Sets when the user signed up.
    pub fn set_created_at(&mut self, value: DateTime<Utc>) {
        self.attrs.set_timestamp("created_at", value);
    }

    /// The last IP address the user was seen from.
    pub fn last_seen_ip(&self) -> Option<&str> {
        self.attrs.get_str("last_seen_ip")
    }

    /// Sets the last IP address; the API derives location data from it.
    pub fn set_last_seen_ip(&mut self, ip: impl Into<String>) {
        self.attrs.set("last_seen_ip", ip.into());
    }

    /// The last user agent the user was seen with.
    pub fn last_seen_user_agent(&self) -> Option<&str> {
        self.attrs.get_str("last_seen_user_agent")
    }

    /// Sets the last user agent.
    pub fn set_last_seen_user_agent(&mut self, user_agent: impl Into<String>) {
        self.attrs.set("last_seen_user_agent", user_agent.into());
    }

    /// When the user last visited the application.
    pub fn last_impression_at(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp("last_impression_at")
    }

    /// When the user last made a request.
    pub fn last_request_at(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp("last_request_at")
    }

    /// Sets when the user last made a request.
    pub fn set_last_request_at(&mut self, value: DateTime<Utc>) {
        self.attrs.set_timestamp("last_request_at", value);
    }

    /// Intercom's engagement score for the user.
    pub fn relationship_score(&self) -> Option<i64> {
        self.attrs.get_i64("relationship_score")
    }

    /// Number of recorded sessions. Zero when the API omits it.
    pub fn session_count(&self) -> i64 {
        self.attrs.get_i64("session_count").unwrap_or(0)
    }

    /// Whether the user opted out of email.
    pub fn unsubscribed_from_emails(&self) -> Option<bool> {
        self.attrs.get_bool("unsubscribed_from_emails")
    }

    /// Sets the email opt-out flag.
    pub fn set_unsubscribed_from_emails(&mut self, value: bool) {
        self.attrs.set("unsubscribed_from_emails", value);
    }

    /// Custom data stored for the user.
    pub fn custom_data(&self) -> CustomData {
        match self.attrs.get("custom_data") {
            Some(Value::Object(map)) => CustomData::from_map_unchecked(map.clone()),
            _ => CustomData::new(),
        }
    }

    /// Replaces the user's custom data.
    pub fn set_custom_data(&mut self, data: CustomData) {
        self.attrs.set("custom_data", data);
    }

    /// Social network profiles the API matched to the user.
    pub fn social_profiles(&self) -> Vec<SocialProfile> {
        self.attrs
            .get("social_profiles")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Geolocation derived from the last seen IP.
    pub fn location_data(&self) -> Option<LocationData> {
        self.attrs
            .get("location_data")
            .filter(|v| v.is_object())
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Sets the companies the user belongs to.
    ///
    /// Companies are write-only on users; the API does not echo them back.
    pub fn set_companies(&mut self, companies: &[Company]) {
        let list: Vec<Value> = companies
            .iter()
            .map(|c| c.attributes().clone().into_value())
            .collect();
        self.attrs.set("companies", list);
    }

    /// Returns the identity (email and user id) of this user.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            email: self.email().map(str::to_string),
            user_id: self.user_id(),
        }
    }

    /// Builds the request body for create/update, holding only writable
    /// attributes that are set.
    pub fn save_attributes(&self) -> Value {
        self.attrs.select(USER_WRITABLE_ATTRIBUTES)
    }
}

/// A social network profile linked to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    /// Network name, e.g. "twitter".
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Id on the network.
    #[serde(default)]
    pub id: Option<String>,

    /// Username on the network.
    #[serde(default)]
    pub username: Option<String>,

    /// Profile URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// Geolocation data for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    /// City name.
    #[serde(default)]
    pub city_name: Option<String>,

    /// Two-letter continent code.
    #[serde(default)]
    pub continent_code: Option<String>,

    /// ISO country code.
    #[serde(default)]
    pub country_code: Option<String>,

    /// Country name.
    #[serde(default)]
    pub country_name: Option<String>,

    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Postal or zip code.
    #[serde(default)]
    pub postal_code: Option<String>,

    /// Region or state.
    #[serde(default)]
    pub region_name: Option<String>,

    /// IANA timezone name.
    #[serde(default)]
    pub timezone: Option<String>,
}
