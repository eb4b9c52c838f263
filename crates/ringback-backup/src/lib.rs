//! Backup snapshot codec for Ringback.
//!
//! Converts the full record set to and from the portable JSON snapshot
//! format. Pure synchronous; no storage dependencies.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "exportedAt": "2024-05-01T10:30:00Z",
//!   "people": [
//!     { "id": "…", "name": "Ada", "createdAt": "…", "lastCalledAt": "…" }
//!   ]
//! }
//! ```
//!
//! Decoding treats its input as untrusted: entries without a usable name are
//! skipped and every other field is coerced into shape.

pub mod error;
mod parse;
mod serialize;

use chrono::{DateTime, Utc};
use ringback_core::Record;
use serde::Serialize;

pub use error::{Error, Result};
pub use parse::{Decoded, SkipReason, Skipped, coerce_entry, decode_snapshot, decode_value};

/// Snapshot format version written by [`Snapshot::new`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// Suggested file name for exported snapshots.
pub const DEFAULT_FILE_NAME: &str = "ringback-backup.json";

// ─── Public types
// ─────────────────────────────────────────────────────────────

/// A complete, self-describing export of the record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
  pub version:     u32,
  pub exported_at: DateTime<Utc>,
  pub people:      Vec<Record>,
}

impl Snapshot {
  /// Snapshot of `people` taken at `exported_at`.
  pub fn new(people: Vec<Record>, exported_at: DateTime<Utc>) -> Self {
    Self { version: SNAPSHOT_VERSION, exported_at, people }
  }

  /// Pretty-printed JSON, ready to be written to a backup file.
  pub fn to_json(&self) -> Result<String> { serialize::to_json_pretty(self) }
}
