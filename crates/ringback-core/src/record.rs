//! Record — the single entity Ringback stores.
//!
//! A record names one person and remembers when they were last contacted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, immutable record identifier.
///
/// Freshly created records get a hyphenated UUID v4, but any non-empty string
/// is accepted so that identifiers from older backups survive a round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
  pub fn generate() -> Self { Self(Uuid::new_v4().hyphenated().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_inner(self) -> String { self.0 }
}

impl From<String> for RecordId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for RecordId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// One person the user wants to stay in touch with.
///
/// Field names serialise in camelCase to match the backup snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
  pub id:             RecordId,
  /// Display name; always trimmed and non-empty.
  pub name:           String,
  /// Set once when the record is created; never changes on edit.
  pub created_at:     DateTime<Utc>,
  pub last_called_at: DateTime<Utc>,
}

impl Record {
  /// A brand-new record created and contacted at `now`.
  ///
  /// The caller is responsible for passing an already-trimmed, non-empty
  /// name; see [`normalize_name`].
  pub fn new(name: String, now: DateTime<Utc>) -> Self {
    Self { id: RecordId::generate(), name, created_at: now, last_called_at: now }
  }

  /// Copy of this record contacted at `at`. Everything else is preserved.
  pub fn contacted_at(&self, at: DateTime<Utc>) -> Self {
    Self { last_called_at: at, ..self.clone() }
  }
}

/// Trim a user-supplied name, returning `None` if nothing is left.
pub fn normalize_name(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
