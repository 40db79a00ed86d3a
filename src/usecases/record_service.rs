//! Record service. Checks documents against the wire schema and rewrites
//! them in canonical form.
//!
//! Canonical form: declared key order, `[]` for empty sequences, UTC
//! timestamps, unknown keys dropped.

use crate::adapters::codec::WireSchema;
use crate::domain::{DomainError, RecordKind};
use crate::ports::RecordCodec;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

pub struct RecordService {
    codec: Arc<dyn RecordCodec>,
    /// When false, unexpected keys are logged and tolerated.
    strict: bool,
}

impl RecordService {
    pub fn new(codec: Arc<dyn RecordCodec>, strict: bool) -> Self {
        Self { codec, strict }
    }

    /// Parses `text` and checks it against the schema for `kind`.
    ///
    /// # Errors
    /// `DomainError::Codec` if `text` is not well-formed, `DomainError::Schema`
    /// listing every mismatch otherwise.
    pub fn check(&self, kind: RecordKind, text: &str) -> Result<(), DomainError> {
        self.parse_checked(kind, text).map(|_| ())
    }

    /// Checks `text` and re-encodes it through the typed record.
    pub fn normalize(&self, kind: RecordKind, text: &str) -> Result<String, DomainError> {
        let value = self.parse_checked(kind, text)?;
        let out = self.codec.reencode(kind, value)?;
        debug!(kind = %kind, bytes_in = text.len(), bytes_out = out.len(), "normalized");
        Ok(out)
    }

    /// Reads a document from disk and normalizes it.
    pub async fn load(&self, kind: RecordKind, path: &Path) -> Result<String, DomainError> {
        let text = Self::read(kind, path).await?;
        self.normalize(kind, &text)
    }

    /// Reads a document from disk and checks it against the schema.
    pub async fn check_file(&self, kind: RecordKind, path: &Path) -> Result<(), DomainError> {
        let text = Self::read(kind, path).await?;
        self.check(kind, &text)
    }

    /// Pretty JSON Schema text for `kind`.
    pub fn schema(&self, kind: RecordKind) -> Result<String, DomainError> {
        serde_json::to_string_pretty(&WireSchema::json_schema(kind))
            .map_err(|e| DomainError::Codec(e.to_string()))
    }

    async fn read(kind: RecordKind, path: &Path) -> Result<String, DomainError> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::Io(format!("read {}: {}", path.display(), e)))?;
        info!(kind = %kind, path = %path.display(), bytes = text.len(), "loaded document");
        Ok(text)
    }

    fn parse_checked(&self, kind: RecordKind, text: &str) -> Result<serde_json::Value, DomainError> {
        let value = self.codec.parse(text)?;
        let (extra, problems): (Vec<_>, Vec<_>) = WireSchema::check(kind, &value)
            .into_iter()
            .partition(|p| p.is_unexpected_key() && !self.strict);

        for p in &extra {
            warn!(kind = %kind, problem = %p, "ignoring key not in wire schema");
        }
        if !problems.is_empty() {
            warn!(kind = %kind, problems = problems.len(), "document does not match wire schema");
            return Err(DomainError::Schema {
                kind,
                problems: problems.iter().map(ToString::to_string).collect(),
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::codec::JsonCodec;
    use std::io::Write;

    fn service(strict: bool) -> RecordService {
        RecordService::new(Arc::new(JsonCodec::new(false)), strict)
    }

    const ITEM_WITH_EXTRA: &str = r#"{"task_id":3,"id":1,"name":"n","description":"d","image_url":"i","color":"red"}"#;

    #[test]
    fn test_normalize_reorders_and_drops_extra_keys() {
        let out = service(false)
            .normalize(RecordKind::Item, ITEM_WITH_EXTRA)
            .unwrap();
        assert_eq!(
            out,
            r#"{"id":1,"name":"n","description":"d","image_url":"i","task_id":3}"#
        );
    }

    #[test]
    fn test_strict_rejects_extra_keys() {
        let err = service(true)
            .check(RecordKind::Item, ITEM_WITH_EXTRA)
            .unwrap_err();
        match err {
            DomainError::Schema { kind, problems } => {
                assert_eq!(kind, RecordKind::Item);
                assert_eq!(problems, vec!["/color: unexpected key".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_fails_even_when_lenient() {
        let err = service(false)
            .check(RecordKind::Attachment, r#"{"type":"image"}"#)
            .unwrap_err();
        assert!(matches!(err, DomainError::Schema { .. }));
    }

    #[test]
    fn test_malformed_text_is_codec_error() {
        let err = service(false).check(RecordKind::Chat, "not json").unwrap_err();
        assert!(matches!(err, DomainError::Codec(_)));
    }

    #[test]
    fn test_schema_text_is_json() {
        let text = service(false).schema(RecordKind::Message).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["title"], "Message");
    }

    #[tokio::test]
    async fn test_load_normalizes_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"id":1,"user_id_1":10,"user_id_2":20,"messages":null}}"#
        )
        .unwrap();

        let out = service(true)
            .load(RecordKind::Chat, file.path())
            .await
            .unwrap();
        assert_eq!(out, r#"{"id":1,"user_id_1":10,"user_id_2":20,"messages":[]}"#);
    }

    #[tokio::test]
    async fn test_check_file_reads_and_checks() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("att.json");
        std::fs::write(&good, r#"{"type":"image","url":"a.png"}"#).unwrap();
        let bad = dir.path().join("att_bad.json");
        std::fs::write(&bad, r#"{"type":"image"}"#).unwrap();

        let svc = service(false);
        svc.check_file(RecordKind::Attachment, &good).await.unwrap();
        let err = svc
            .check_file(RecordKind::Attachment, &bad)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Schema { .. }));
        let err = svc
            .check_file(RecordKind::Attachment, &dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Io(_)));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = service(false)
            .load(RecordKind::Chat, &dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Io(_)));
    }
}
