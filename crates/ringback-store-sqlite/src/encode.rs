//! Encoding and decoding helpers between [`Record`] and the plain-text
//! representation stored in the `people` table.
//!
//! Timestamps are stored as RFC 3339 strings; ids are stored verbatim.

use chrono::{DateTime, Utc};
use ringback_core::{Record, RecordId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
  DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from, or about to be written to, a `people` row.
pub struct RawRecord {
  pub id:             String,
  pub name:           String,
  pub created_at:     String,
  pub last_called_at: String,
}

impl RawRecord {
  pub fn from_record(r: &Record) -> Self {
    Self {
      id:             r.id.as_str().to_owned(),
      name:           r.name.clone(),
      created_at:     encode_dt(r.created_at),
      last_called_at: encode_dt(r.last_called_at),
    }
  }

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      name:           row.get(1)?,
      created_at:     row.get(2)?,
      last_called_at: row.get(3)?,
    })
  }

  pub fn into_record(self) -> Result<Record> {
    let created_at = decode_dt(&self.created_at).map_err(|e| Error::Decode {
      id:     self.id.clone(),
      column: "created_at",
      reason: e.to_string(),
    })?;
    let last_called_at = decode_dt(&self.last_called_at).map_err(|e| Error::Decode {
      id:     self.id.clone(),
      column: "last_called_at",
      reason: e.to_string(),
    })?;

    Ok(Record { id: RecordId::from(self.id), name: self.name, created_at, last_called_at })
  }
}
