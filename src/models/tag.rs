//! Tag records.
//!
//! A tag groups users. Creating or updating a tag can also tag (or untag)
//! a list of users in the same request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Attributes, Resource};
use crate::error::IntercomError;

/// Whether the listed users should be added to or removed from a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagAction {
    /// Apply the tag to the listed users.
    Tag,
    /// Remove the tag from the listed users.
    Untag,
}

impl TagAction {
    /// The wire value of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagAction::Tag => "tag",
            TagAction::Untag => "untag",
        }
    }
}

/// A tag applied to users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag {
    attrs: Attributes,
}

impl Resource for Tag {
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

impl Tag {
    /// Creates a tag with the given name and action.
    pub fn new(name: impl Into<String>, action: TagAction) -> Self {
        let mut tag = Self::default();
        tag.set_name(name);
        tag.set_tag_or_untag(action);
        tag
    }

    /// Intercom's internal id.
    pub fn id(&self) -> Option<String> {
        self.attrs.get_string("id")
    }

    /// The tag name.
    pub fn name(&self) -> Option<&str> {
        self.attrs.get_str("name")
    }

    /// Sets the tag name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.attrs.set("name", name.into());
    }

    /// Display color.
    pub fn color(&self) -> Option<&str> {
        self.attrs.get_str("color")
    }

    /// Sets the display color.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.attrs.set("color", color.into());
    }

    /// Whether the tag is a segment.
    pub fn segment(&self) -> Option<bool> {
        self.attrs.get_bool("segment")
    }

    /// How many users carry the tag.
    pub fn tagged_user_count(&self) -> Option<i64> {
        self.attrs.get_i64("tagged_user_count")
    }

    /// User ids to tag or untag.
    pub fn user_ids(&self) -> Vec<String> {
        string_list(self.attrs.get("user_ids"))
    }

    /// Sets the user ids to tag or untag.
    pub fn set_user_ids<I, S>(&mut self, user_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<Value> = user_ids.into_iter().map(|s| Value::String(s.into())).collect();
        self.attrs.set("user_ids", ids);
    }

    /// Emails of users to tag or untag.
    pub fn emails(&self) -> Vec<String> {
        string_list(self.attrs.get("emails"))
    }

    /// Sets the emails of users to tag or untag.
    pub fn set_emails<I, S>(&mut self, emails: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let emails: Vec<Value> = emails.into_iter().map(|s| Value::String(s.into())).collect();
        self.attrs.set("emails", emails);
    }

    /// The requested action.
    pub fn tag_or_untag(&self) -> Option<TagAction> {
        match self.attrs.get_str("tag_or_untag")? {
            "tag" => Some(TagAction::Tag),
            "untag" => Some(TagAction::Untag),
            _ => None,
        }
    }

    /// Sets the requested action.
    pub fn set_tag_or_untag(&mut self, action: TagAction) {
        self.attrs.set("tag_or_untag", action.as_str());
    }

    /// Builds the request body for create/update.
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::Validation` when the name or action is missing.
    pub fn save_attributes(&self) -> Result<Value, IntercomError> {
        if self.name().is_none_or(|n| n.trim().is_empty()) {
            return Err(IntercomError::validation("tag name is required"));
        }
        if self.tag_or_untag().is_none() {
            return Err(IntercomError::validation(
                "tag_or_untag must be \"tag\" or \"untag\"",
            ));
        }
        Ok(self
            .attrs
            .select(&["name", "tag_or_untag", "user_ids", "emails", "color"]))
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_tag_body() {
        let mut tag = Tag::new("Free Trial", TagAction::Tag);
        tag.set_user_ids(["abc123", "def456"]);

        assert_eq!(
            tag.save_attributes().unwrap(),
            json!({
                "name": "Free Trial",
                "tag_or_untag": "tag",
                "user_ids": ["abc123", "def456"]
            })
        );
    }

    #[test]
    fn test_response_accessors() {
        let tag = Tag::from_value(json!({
            "id": "4f73428b5e4dfc000b000112",
            "name": "Free Trial",
            "segment": false,
            "tagged_user_count": 2,
            "color": "green"
        }));

        assert_eq!(tag.id().as_deref(), Some("4f73428b5e4dfc000b000112"));
        assert_eq!(tag.tagged_user_count(), Some(2));
        assert_eq!(tag.segment(), Some(false));
        assert_eq!(tag.color(), Some("green"));
        assert!(tag.user_ids().is_empty());
    }

    #[test]
    fn test_save_requires_name_and_action() {
        let tag = Tag::from_value(json!({ "tag_or_untag": "tag" }));
        assert!(tag.save_attributes().is_err());

        let tag = Tag::from_value(json!({ "name": "VIP", "tag_or_untag": "maybe" }));
        assert!(tag.tag_or_untag().is_none());
        assert!(tag.save_attributes().is_err());
    }

    #[test]
    fn test_emails_roundtrip() {
        let mut tag = Tag::new("VIP", TagAction::Untag);
        tag.set_emails(vec!["a@example.com".to_string()]);
        assert_eq!(tag.emails(), vec!["a@example.com".to_string()]);
        assert_eq!(tag.tag_or_untag(), Some(TagAction::Untag));
    }
}
