//! Record kinds. Names a record type independently of its Rust struct.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Chat,
    Message,
    Attachment,
    Item,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Chat,
        RecordKind::Message,
        RecordKind::Attachment,
        RecordKind::Item,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Chat => "chat",
            RecordKind::Message => "message",
            RecordKind::Attachment => "attachment",
            RecordKind::Item => "item",
        }
    }

    /// Capitalized name, used for `$defs` keys and UI labels.
    pub fn title(self) -> &'static str {
        match self {
            RecordKind::Chat => "Chat",
            RecordKind::Message => "Message",
            RecordKind::Attachment => "Attachment",
            RecordKind::Item => "Item",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        RecordKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| format!("unknown record kind: {}", s))
    }
}
