//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

use crate::domain::RecordKind;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Codec error: {0}")]
    Codec(String),

    /// Document does not match the wire schema. Every problem found is listed.
    #[error("{kind} does not match wire schema: {}", .problems.join("; "))]
    Schema {
        kind: RecordKind,
        problems: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Input error: {0}")]
    Input(String),
}
