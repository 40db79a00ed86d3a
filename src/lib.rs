//! chat-records: chat, message, attachment and item records with a versioned
//! JSON wire schema, laid out with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
