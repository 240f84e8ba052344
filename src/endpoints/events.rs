//! Event endpoints.

use chrono::Utc;

use crate::client::IntercomClient;
use crate::error::IntercomError;
use crate::models::Event;

const EVENTS_PATH: &str = "events";

impl IntercomClient {
    /// Submits an event. `created` defaults to the current time.
    pub async fn create_event(&self, event: &Event) -> Result<(), IntercomError> {
        let body = event.save_attributes(Utc::now())?;
        self.post(EVENTS_PATH, body).await?;
        Ok(())
    }
}
