//! Tag endpoints.

use serde_json::json;

use crate::client::IntercomClient;
use crate::error::IntercomError;
use crate::models::{Resource, Tag};

const TAGS_PATH: &str = "tags";

impl IntercomClient {
    /// Finds a tag by name.
    pub async fn find_tag(&self, name: &str) -> Result<Tag, IntercomError> {
        if name.trim().is_empty() {
            return Err(IntercomError::validation("tag name is required"));
        }
        let response = self.get(TAGS_PATH, json!({ "name": name })).await?;
        Ok(Tag::from_value(response))
    }

    /// Creates a tag, tagging or untagging the listed users.
    pub async fn create_tag(&self, tag: &Tag) -> Result<Tag, IntercomError> {
        let response = self.post(TAGS_PATH, tag.save_attributes()?).await?;
        Ok(Tag::from_value(response))
    }

    /// Updates an existing tag, tagging or untagging the listed users.
    pub async fn update_tag(&self, tag: &Tag) -> Result<Tag, IntercomError> {
        let response = self.put(TAGS_PATH, tag.save_attributes()?).await?;
        Ok(Tag::from_value(response))
    }

    /// Creates the tag if it has no id yet, otherwise updates it, then
    /// merges the response back in.
    pub async fn save_tag(&self, tag: &mut Tag) -> Result<(), IntercomError> {
        let body = tag.save_attributes()?;
        let response = if tag.id().is_some() {
            self.put(TAGS_PATH, body).await?
        } else {
            self.post(TAGS_PATH, body).await?
        };
        tag.merge(response);
        Ok(())
    }
}
