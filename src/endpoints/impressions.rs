//! Impression endpoints.

use serde_json::Value;

use crate::client::IntercomClient;
use crate::error::IntercomError;
use crate::models::{Impression, ImpressionParams, Resource, UserIdentity};

const IMPRESSIONS_PATH: &str = "users/impressions";

impl IntercomClient {
    /// Records that the identified user visited the application.
    pub async fn create_impression(
        &self,
        identity: &UserIdentity,
        details: &ImpressionParams,
    ) -> Result<Impression, IntercomError> {
        identity.validate()?;
        let mut params = identity.to_params();
        details.extend(&mut params);

        let response = self.post(IMPRESSIONS_PATH, Value::Object(params)).await?;
        Ok(Impression::from_value(response))
    }
}
