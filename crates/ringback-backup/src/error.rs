//! Error types for the backup snapshot codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The input is not valid JSON at all.
  #[error("malformed JSON: {0}")]
  Syntax(#[from] serde_json::Error),

  /// Valid JSON, but not shaped like a snapshot.
  #[error("{0}")]
  InvalidFormat(&'static str),

  #[error("cannot encode snapshot: {0}")]
  Encode(#[source] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
