//! Infrastructure adapters. Implement ports.
//!
//! Wire codec and terminal UI. Map errors to DomainError.

pub mod codec;
pub mod ui;
