//! Versioned wire schema. The field list per record kind, kept apart from the
//! Rust types so the wire contract can be checked on its own.
//!
//! Renaming, adding or reordering a field is a breaking change and must bump
//! `SCHEMA_VERSION`.

use crate::domain::RecordKind;
use chrono::DateTime;
use serde_json::{Map, Value, json};
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;

const JSON_SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    String,
    /// RFC 3339 string.
    Timestamp,
    /// Array of records; `null` is accepted as empty.
    Sequence(RecordKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

const fn field(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec { name, ty }
}

const CHAT_FIELDS: &[FieldSpec] = &[
    field("id", FieldType::Integer),
    field("user_id_1", FieldType::Integer),
    field("user_id_2", FieldType::Integer),
    field("messages", FieldType::Sequence(RecordKind::Message)),
];

const MESSAGE_FIELDS: &[FieldSpec] = &[
    field("id", FieldType::Integer),
    field("user_id", FieldType::Integer),
    field("message", FieldType::String),
    field("attachments", FieldType::Sequence(RecordKind::Attachment)),
    field("created_at", FieldType::Timestamp),
];

const ATTACHMENT_FIELDS: &[FieldSpec] = &[
    field("type", FieldType::String),
    field("url", FieldType::String),
];

const ITEM_FIELDS: &[FieldSpec] = &[
    field("id", FieldType::Integer),
    field("name", FieldType::String),
    field("description", FieldType::String),
    field("image_url", FieldType::String),
    field("task_id", FieldType::Integer),
];

/// One mismatch between a document and the schema. `path` is a JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaProblem {
    NotAnObject { path: String },
    Missing { path: String },
    Unexpected { path: String },
    WrongType { path: String, expected: &'static str },
}

impl SchemaProblem {
    /// Extra keys are tolerated by the decoder; everything else breaks it.
    pub fn is_unexpected_key(&self) -> bool {
        matches!(self, SchemaProblem::Unexpected { .. })
    }
}

impl fmt::Display for SchemaProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaProblem::NotAnObject { path } => write!(f, "{}: expected object", or_root(path)),
            SchemaProblem::Missing { path } => write!(f, "{}: missing", path),
            SchemaProblem::Unexpected { path } => write!(f, "{}: unexpected key", path),
            SchemaProblem::WrongType { path, expected } => {
                write!(f, "{}: expected {}", path, expected)
            }
        }
    }
}

/// Escapes one JSON pointer reference token (RFC 6901): `~` then `/`.
fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn or_root(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

pub struct WireSchema;

impl WireSchema {
    pub fn fields(kind: RecordKind) -> &'static [FieldSpec] {
        match kind {
            RecordKind::Chat => CHAT_FIELDS,
            RecordKind::Message => MESSAGE_FIELDS,
            RecordKind::Attachment => ATTACHMENT_FIELDS,
            RecordKind::Item => ITEM_FIELDS,
        }
    }

    pub fn field_names(kind: RecordKind) -> Vec<&'static str> {
        Self::fields(kind).iter().map(|f| f.name).collect()
    }

    /// JSON Schema (draft 2020-12) for `kind`. Nested kinds go under `$defs`.
    pub fn json_schema(kind: RecordKind) -> Value {
        let mut root = object_schema(kind);
        root.insert("$schema".into(), json!(JSON_SCHEMA_DIALECT));
        root.insert(
            "$id".into(),
            json!(format!("chat-records/v{}/{}", SCHEMA_VERSION, kind)),
        );
        root.insert("title".into(), json!(kind.title()));
        root.insert("x-schema-version".into(), json!(SCHEMA_VERSION));

        let mut nested = Vec::new();
        collect_nested(kind, &mut nested);
        if !nested.is_empty() {
            let defs: Map<String, Value> = nested
                .into_iter()
                .map(|k| (k.title().to_string(), Value::Object(object_schema(k))))
                .collect();
            root.insert("$defs".into(), Value::Object(defs));
        }
        Value::Object(root)
    }

    /// Structural check of `value` against the schema for `kind`. Recurses into
    /// sequences. An empty result means the document conforms.
    pub fn check(kind: RecordKind, value: &Value) -> Vec<SchemaProblem> {
        let mut problems = Vec::new();
        check_object(kind, value, "", &mut problems);
        problems
    }
}

fn object_schema(kind: RecordKind) -> Map<String, Value> {
    let fields = WireSchema::fields(kind);
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.name.to_string(), property_schema(f.ty)))
        .collect();
    let required: Vec<&str> = fields.iter().map(|f| f.name).collect();

    let mut out = Map::new();
    out.insert("type".into(), json!("object"));
    out.insert("properties".into(), Value::Object(properties));
    out.insert("required".into(), json!(required));
    out
}

fn property_schema(ty: FieldType) -> Value {
    match ty {
        FieldType::Integer => json!({ "type": "integer" }),
        FieldType::String => json!({ "type": "string" }),
        FieldType::Timestamp => json!({ "type": "string", "format": "date-time" }),
        FieldType::Sequence(inner) => json!({
            "type": ["array", "null"],
            "items": { "$ref": format!("#/$defs/{}", inner.title()) }
        }),
    }
}

fn collect_nested(kind: RecordKind, out: &mut Vec<RecordKind>) {
    for f in WireSchema::fields(kind) {
        if let FieldType::Sequence(inner) = f.ty {
            if !out.contains(&inner) {
                out.push(inner);
                collect_nested(inner, out);
            }
        }
    }
}

fn check_object(kind: RecordKind, value: &Value, path: &str, problems: &mut Vec<SchemaProblem>) {
    let Some(obj) = value.as_object() else {
        problems.push(SchemaProblem::NotAnObject {
            path: path.to_string(),
        });
        return;
    };

    let fields = WireSchema::fields(kind);
    for f in fields {
        let field_path = format!("{}/{}", path, escape_segment(f.name));
        match obj.get(f.name) {
            None => problems.push(SchemaProblem::Missing { path: field_path }),
            Some(v) => check_field(f.ty, v, &field_path, problems),
        }
    }
    for key in obj.keys() {
        if !fields.iter().any(|f| f.name == key.as_str()) {
            problems.push(SchemaProblem::Unexpected {
                path: format!("{}/{}", path, escape_segment(key)),
            });
        }
    }
}

fn check_field(ty: FieldType, value: &Value, path: &str, problems: &mut Vec<SchemaProblem>) {
    let wrong = |expected| SchemaProblem::WrongType {
        path: path.to_string(),
        expected,
    };
    match ty {
        FieldType::Integer => {
            if !value.is_i64() {
                problems.push(wrong("integer"));
            }
        }
        FieldType::String => {
            if !value.is_string() {
                problems.push(wrong("string"));
            }
        }
        FieldType::Timestamp => {
            let ok = value
                .as_str()
                .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok());
            if !ok {
                problems.push(wrong("RFC 3339 timestamp"));
            }
        }
        FieldType::Sequence(inner) => match value {
            Value::Null => {}
            Value::Array(elems) => {
                for (i, elem) in elems.iter().enumerate() {
                    check_object(inner, elem, &format!("{}/{}", path, i), problems);
                }
            }
            _ => problems.push(wrong("array")),
        },
    }
}
