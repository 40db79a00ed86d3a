//! Wire codec adapters. JSON encoding of records and the versioned schema
//! describing it.

pub mod json_codec;
pub mod schema;

pub use json_codec::JsonCodec;
pub use schema::{FieldSpec, FieldType, SCHEMA_VERSION, SchemaProblem, WireSchema};
