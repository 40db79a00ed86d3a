//! Implements RecordCodec with serde_json.

use crate::domain::{Attachment, Chat, DomainError, Item, Message, RecordKind};
use crate::ports::RecordCodec;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON codec. Key order follows struct field order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn encode<T: Serialize>(&self, record: &T) -> Result<String, DomainError> {
        let out = if self.pretty {
            serde_json::to_string_pretty(record)
        } else {
            serde_json::to_string(record)
        };
        out.map_err(|e| DomainError::Codec(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(text: &str) -> Result<T, DomainError> {
        serde_json::from_str(text).map_err(|e| DomainError::Codec(e.to_string()))
    }

    fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, DomainError> {
        serde_json::from_value(value).map_err(|e| DomainError::Codec(e.to_string()))
    }
}

impl RecordCodec for JsonCodec {
    fn encode_chat(&self, chat: &Chat) -> Result<String, DomainError> {
        self.encode(chat)
    }

    fn decode_chat(&self, text: &str) -> Result<Chat, DomainError> {
        Self::decode(text)
    }

    fn encode_message(&self, message: &Message) -> Result<String, DomainError> {
        self.encode(message)
    }

    fn decode_message(&self, text: &str) -> Result<Message, DomainError> {
        Self::decode(text)
    }

    fn encode_item(&self, item: &Item) -> Result<String, DomainError> {
        self.encode(item)
    }

    fn decode_item(&self, text: &str) -> Result<Item, DomainError> {
        Self::decode(text)
    }

    fn parse(&self, text: &str) -> Result<Value, DomainError> {
        Self::decode(text)
    }

    fn reencode(&self, kind: RecordKind, value: Value) -> Result<String, DomainError> {
        match kind {
            RecordKind::Chat => self.encode(&Self::from_value::<Chat>(value)?),
            RecordKind::Message => self.encode(&Self::from_value::<Message>(value)?),
            RecordKind::Attachment => self.encode(&Self::from_value::<Attachment>(value)?),
            RecordKind::Item => self.encode(&Self::from_value::<Item>(value)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample_chat() -> Chat {
        let mut chat = Chat::new(1, 10, 20);
        chat.push_message(
            Message::new(
                100,
                10,
                "hi",
                Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap(),
            )
            .with_attachment(Attachment::new("image", "https://cdn.example.com/1.png")),
        );
        chat
    }

    #[test]
    fn test_chat_keys_in_declared_order() {
        let codec = JsonCodec::new(false);
        let text = codec.encode_chat(&Chat::new(1, 10, 20)).unwrap();
        assert_eq!(
            text,
            r#"{"id":1,"user_id_1":10,"user_id_2":20,"messages":[]}"#
        );
    }

    #[test]
    fn test_item_encoding() {
        let codec = JsonCodec::new(false);
        let item = Item::new(7, "Lamp", "Desk lamp", "https://img.example.com/7.jpg", 42);
        let text = codec.encode_item(&item).unwrap();
        assert_eq!(
            text,
            r#"{"id":7,"name":"Lamp","description":"Desk lamp","image_url":"https://img.example.com/7.jpg","task_id":42}"#
        );
        assert_eq!(codec.decode_item(&text).unwrap(), item);
    }

    #[test]
    fn test_timestamp_is_rfc3339_utc() {
        let codec = JsonCodec::new(false);
        let chat = sample_chat();
        let text = codec.encode_message(&chat.messages[0]).unwrap();
        assert!(text.contains(r#""created_at":"2024-03-05T09:30:00Z""#));
    }

    #[test]
    fn test_pretty_output_decodes_to_same_chat() {
        let codec = JsonCodec::new(true);
        let chat = sample_chat();
        let text = codec.encode_chat(&chat).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(codec.decode_chat(&text).unwrap(), chat);
    }

    #[test]
    fn test_decode_malformed_is_codec_error() {
        let codec = JsonCodec::default();
        let err = codec.decode_chat("{\"id\": 1,").unwrap_err();
        assert!(matches!(err, DomainError::Codec(_)));
    }

    #[test]
    fn test_reencode_fills_null_sequences_and_drops_unknown_keys() {
        let codec = JsonCodec::new(false);
        let value = json!({
            "id": 5,
            "user_id": 10,
            "message": "no files",
            "attachments": null,
            "created_at": "2024-03-05T11:30:00+02:00",
            "edited": true
        });
        let text = codec.reencode(RecordKind::Message, value).unwrap();
        assert_eq!(
            text,
            r#"{"id":5,"user_id":10,"message":"no files","attachments":[],"created_at":"2024-03-05T09:30:00Z"}"#
        );
    }

    #[test]
    fn test_reencode_attachment() {
        let codec = JsonCodec::new(false);
        let text = codec
            .reencode(RecordKind::Attachment, json!({"url": "u", "type": "file"}))
            .unwrap();
        assert_eq!(text, r#"{"type":"file","url":"u"}"#);
    }

    #[test]
    fn test_reencode_wrong_shape_is_codec_error() {
        let codec = JsonCodec::new(false);
        let err = codec
            .reencode(RecordKind::Item, json!({"id": "seven"}))
            .unwrap_err();
        assert!(matches!(err, DomainError::Codec(_)));
    }
}
