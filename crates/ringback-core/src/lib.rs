//! Core types and trait definitions for the Ringback reminder store.
//!
//! This crate is deliberately free of database and runtime dependencies.
//! The storage backend, backup codec, and contact service all depend on it.

pub mod error;
pub mod overdue;
pub mod record;
pub mod store;

pub use error::{Error, Result};
pub use record::{Record, RecordId};
