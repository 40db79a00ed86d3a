//! Core domain layer. No external I/O dependencies.
//!
//! Records and their kinds live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod kind;

pub use entities::{Attachment, Chat, Item, Message};
pub use errors::DomainError;
pub use kind::RecordKind;
