//! Message thread endpoints.

use serde_json::Value;

use crate::client::IntercomClient;
use crate::error::IntercomError;
use crate::models::{MessageThread, Resource, UserIdentity};

const MESSAGE_THREADS_PATH: &str = "users/message_threads";

impl IntercomClient {
    /// Fetches a single thread of the identified user.
    pub async fn find_message_thread(
        &self,
        identity: &UserIdentity,
        thread_id: i64,
    ) -> Result<MessageThread, IntercomError> {
        identity.validate()?;
        let mut params = identity.to_params();
        params.insert("thread_id".to_string(), Value::from(thread_id));

        let response = self.get(MESSAGE_THREADS_PATH, Value::Object(params)).await?;
        Ok(MessageThread::from_value(response))
    }

    /// Fetches every thread of the identified user.
    pub async fn find_message_threads(
        &self,
        identity: &UserIdentity,
    ) -> Result<Vec<MessageThread>, IntercomError> {
        identity.validate()?;
        let response = self
            .get(MESSAGE_THREADS_PATH, Value::Object(identity.to_params()))
            .await?;

        Ok(match response {
            Value::Array(threads) => threads.into_iter().map(MessageThread::from_value).collect(),
            Value::Null => Vec::new(),
            single => vec![MessageThread::from_value(single)],
        })
    }

    /// Starts a new thread on behalf of the identified user.
    pub async fn create_message_thread(
        &self,
        identity: &UserIdentity,
        body: &str,
    ) -> Result<MessageThread, IntercomError> {
        identity.validate()?;
        let params = message_params(identity, Some(body))?;
        let response = self.post(MESSAGE_THREADS_PATH, params).await?;
        Ok(MessageThread::from_value(response))
    }

    /// Replies to a thread and/or sets its read flag.
    ///
    /// Passing no body with `read: Some(true)` marks the thread read
    /// without replying.
    ///
    /// # Errors
    ///
    /// Returns `IntercomError::Validation` if neither a body nor a read flag
    /// is given, or if the body is blank.
    pub async fn reply_message_thread(
        &self,
        identity: &UserIdentity,
        thread_id: i64,
        body: Option<&str>,
        read: Option<bool>,
    ) -> Result<MessageThread, IntercomError> {
        identity.validate()?;
        if body.is_none() && read.is_none() {
            return Err(IntercomError::validation(
                "a reply needs a message body or a read flag",
            ));
        }
        let mut params = message_params(identity, body)?;
        if let Value::Object(map) = &mut params {
            map.insert("thread_id".to_string(), Value::from(thread_id));
            if let Some(read) = read {
                map.insert("read".to_string(), Value::Bool(read));
            }
        }

        let response = self.put(MESSAGE_THREADS_PATH, params).await?;
        Ok(MessageThread::from_value(response))
    }
}

fn message_params(identity: &UserIdentity, body: Option<&str>) -> Result<Value, IntercomError> {
    let mut params = identity.to_params();
    if let Some(body) = body {
        if body.trim().is_empty() {
            return Err(IntercomError::validation("message body must not be empty"));
        }
        params.insert("body".to_string(), Value::String(body.to_string()));
    }
    Ok(Value::Object(params))
}
