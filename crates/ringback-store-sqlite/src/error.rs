//! Error type for `ringback-store-sqlite`.

use ringback_core::store::{FailureKind, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot open database: {0}")]
  Open(#[source] tokio_rusqlite::Error),

  #[error("database schema version {found} is newer than supported version {supported}")]
  UnsupportedSchema { found: i64, supported: i64 },

  #[error("database read failed: {0}")]
  Read(#[source] tokio_rusqlite::Error),

  #[error("database write failed: {0}")]
  Write(#[source] tokio_rusqlite::Error),

  #[error("record {id:?} has an unreadable {column}: {reason}")]
  Decode {
    id:     String,
    column: &'static str,
    reason: String,
  },
}

impl StoreError for Error {
  fn kind(&self) -> FailureKind {
    match self {
      Error::Open(_) | Error::UnsupportedSchema { .. } | Error::Read(_) => {
        FailureKind::Unavailable
      }
      Error::Write(_) => FailureKind::Write,
      Error::Decode { .. } => FailureKind::Corrupt,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
