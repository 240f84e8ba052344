//! Note endpoints.

use serde_json::Value;

use crate::client::IntercomClient;
use crate::error::IntercomError;
use crate::models::{Note, Resource, UserIdentity};

const NOTES_PATH: &str = "users/notes";

impl IntercomClient {
    /// Attaches a note to the identified user.
    pub async fn create_note(
        &self,
        identity: &UserIdentity,
        body: &str,
    ) -> Result<Note, IntercomError> {
        identity.validate()?;
        if body.trim().is_empty() {
            return Err(IntercomError::validation("note body must not be empty"));
        }

        let mut params = identity.to_params();
        params.insert("body".to_string(), Value::String(body.to_string()));

        let response = self.post(NOTES_PATH, Value::Object(params)).await?;
        Ok(Note::from_value(response))
    }
}
