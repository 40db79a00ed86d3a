//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Chat, DomainError, Item, Message, RecordKind};
use serde_json::Value;

/// Wire codec for records. Implementations must keep field names exactly as
/// declared on the domain types and emit empty sequences as `[]`.
pub trait RecordCodec: Send + Sync {
    fn encode_chat(&self, chat: &Chat) -> Result<String, DomainError>;
    fn decode_chat(&self, text: &str) -> Result<Chat, DomainError>;

    fn encode_message(&self, message: &Message) -> Result<String, DomainError>;
    fn decode_message(&self, text: &str) -> Result<Message, DomainError>;

    fn encode_item(&self, item: &Item) -> Result<String, DomainError>;
    fn decode_item(&self, text: &str) -> Result<Item, DomainError>;

    /// Parse wire text into an untyped tree, for schema checks.
    fn parse(&self, text: &str) -> Result<Value, DomainError>;

    /// Decode `value` as a record of `kind` and encode it back to wire text.
    fn reencode(&self, kind: RecordKind, value: Value) -> Result<String, DomainError>;
}
