//! Message thread records.
//!
//! A message thread is a conversation between a user and the application's
//! admins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{from_timestamp, Attributes, Resource};

/// A conversation with a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageThread {
    attrs: Attributes,
}

impl Resource for MessageThread {
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

impl MessageThread {
    /// The thread id.
    pub fn thread_id(&self) -> Option<i64> {
        self.attrs.get_i64("thread_id")
    }

    /// When the thread was started.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp("created_at")
    }

    /// When the thread last changed.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.attrs.timestamp("updated_at")
    }

    /// Whether the user has read the latest message.
    pub fn read(&self) -> Option<bool> {
        self.attrs.get_bool("read")
    }

    /// Messages in the thread, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.attrs
            .get("messages")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A single message in a thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Rendered message body.
    #[serde(default)]
    pub html: Option<String>,

    /// Creation time in epoch seconds.
    #[serde(default)]
    pub created_at: Option<Value>,

    /// Whether an admin wrote the message.
    #[serde(default)]
    pub from_admin: Option<bool>,

    /// Who wrote the message.
    #[serde(default)]
    pub author: Option<MessageAuthor>,
}

impl Message {
    /// When the message was sent.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_ref().and_then(from_timestamp)
    }
}

/// The author of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageAuthor {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Avatar image URL.
    #[serde(default)]
    pub avatar: Option<Value>,

    /// Whether the author is an admin.
    #[serde(default)]
    pub admin: Option<bool>,
}

impl MessageAuthor {
    /// Returns the name if present, otherwise the email, otherwise a placeholder.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thread_accessors() {
        let thread = MessageThread::from_value(json!({
            "thread_id": 5591,
            "created_at": 1334251004,
            "updated_at": 1334251005,
            "read": true,
            "messages": [
                {
                    "html": "<p>Hey Intercom, What is up?</p>\n\n<p></p>",
                    "created_at": 1334251004,
                    "from_admin": false,
                    "author": { "name": "Ben", "email": "ben@example.com", "admin": false }
                },
                {
                    "html": "<p>Not much</p>",
                    "created_at": "1334251100",
                    "author": { "email": "support@example.com", "admin": true }
                }
            ]
        }));

        assert_eq!(thread.thread_id(), Some(5591));
        assert_eq!(thread.created_at().unwrap().timestamp(), 1334251004);
        assert_eq!(thread.read(), Some(true));

        let messages = thread.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author.as_ref().unwrap().display_name(), "Ben");
        assert_eq!(
            messages[1].author.as_ref().unwrap().display_name(),
            "support@example.com"
        );
        assert_eq!(messages[1].created_at().unwrap().timestamp(), 1334251100);
    }

    #[test]
    fn test_empty_thread() {
        let thread = MessageThread::from_value(Value::Null);
        assert!(thread.thread_id().is_none());
        assert!(thread.messages().is_empty());
    }
}
