//! Error types for `ringback-core`.
//!
//! This is the taxonomy surfaced to the UI layer. Backend and codec errors
//! are folded into it by the contact service.

use thiserror::Error;

use crate::{
  record::RecordId,
  store::{FailureKind, StoreError},
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  /// The storage engine could not be opened or read.
  #[error("storage unavailable: {0}")]
  StorageUnavailable(#[source] BoxError),

  /// A single write failed. Nothing in memory was changed.
  #[error("storage write failed: {0}")]
  StorageWrite(#[source] BoxError),

  #[error("stored record is corrupt: {0}")]
  CorruptRecord(#[source] BoxError),

  #[error("invalid backup format: {0}")]
  InvalidBackupFormat(String),

  #[error("import failed: {0}")]
  ImportFailed(#[source] BoxError),

  #[error("record not found: {0}")]
  RecordNotFound(RecordId),

  #[error("name must not be blank")]
  BlankName,
}

impl Error {
  /// Fold a backend failure into the taxonomy according to its
  /// [`FailureKind`].
  pub fn from_store<E: StoreError>(err: E) -> Self {
    match err.kind() {
      FailureKind::Unavailable => Self::StorageUnavailable(Box::new(err)),
      FailureKind::Write => Self::StorageWrite(Box::new(err)),
      FailureKind::Corrupt => Self::CorruptRecord(Box::new(err)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
