//! Domain entities. Plain records exchanged with other services.
//!
//! Field names are the wire contract; see `adapters::codec::schema` for the
//! versioned description of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Two-party conversation. Messages are kept in append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub user_id_1: i64,
    pub user_id_2: i64,
    #[serde(deserialize_with = "null_as_empty")]
    pub messages: Vec<Message>,
}

impl Chat {
    /// Starts a conversation with no messages.
    pub fn new(id: i64, user_id_1: i64, user_id_2: i64) -> Self {
        Self {
            id,
            user_id_1,
            user_id_2,
            messages: Vec::new(),
        }
    }

    /// Appends a message at the end. Sender and ordering are not checked.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn participants(&self) -> [i64; 2] {
        [self.user_id_1, self.user_id_2]
    }

    pub fn has_participant(&self, user_id: i64) -> bool {
        self.user_id_1 == user_id || self.user_id_2 == user_id
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// A single message from a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    /// Display order.
    #[serde(deserialize_with = "null_as_empty")]
    pub attachments: Vec<Attachment>,
    /// RFC 3339 on the wire. Offsets other than UTC are normalized on decode.
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: i64,
        user_id: i64,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            message: message.into(),
            attachments: Vec::new(),
            created_at,
        }
    }

    /// Builder-style append of one attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Reference to media embedded in a message. No identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Free-form media kind ("image", "file", ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl Attachment {
    pub fn new(kind: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            url: url.into(),
        }
    }
}

/// Named entity owned by a task in an external tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Foreign key; the task itself lives elsewhere.
    pub task_id: i64,
}

impl Item {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
        task_id: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            image_url: image_url.into(),
            task_id,
        }
    }
}

/// Accepts `null` where a sequence is expected. Some producers encode empty
/// lists that way; we always emit `[]`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
