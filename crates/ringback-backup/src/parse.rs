//! Untrusted JSON → validated records.
//!
//! Decoding never fails because of a single bad entry. The document as a
//! whole is rejected only when it is not JSON or has no `people` array;
//! individual entries are either coerced into a well-formed [`Record`] or
//! skipped with a [`SkipReason`].

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use ringback_core::{Record, RecordId, record::normalize_name};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::{Error, Result, SNAPSHOT_VERSION};

// ─── Public types ────────────────────────────────────────────────────────────

/// Why an entry of the `people` array did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  NotAnObject,
  MissingName,
  NameNotString,
  BlankName,
  /// A later entry carried the same id and replaced this one.
  DuplicateId,
}

/// A skipped entry and its position in the `people` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
  pub index:  usize,
  pub reason: SkipReason,
}

/// The outcome of decoding a snapshot document.
#[derive(Debug, Clone)]
pub struct Decoded {
  /// Well-formed records with unique ids, in document order.
  pub records: Vec<Record>,
  pub skipped: Vec<Skipped>,
  /// The `version` field, if the document had a numeric one.
  pub version: Option<u64>,
}

// ─── Document ────────────────────────────────────────────────────────────────

/// Parse `input` as JSON and run it through [`decode_value`].
///
/// `now` stands in for any missing timestamp.
pub fn decode_snapshot(input: &str, now: DateTime<Utc>) -> Result<Decoded> {
  let doc: Value = serde_json::from_str(input)?;
  decode_value(&doc, now)
}

/// Validate an already-parsed snapshot document.
pub fn decode_value(doc: &Value, now: DateTime<Utc>) -> Result<Decoded> {
  let obj = doc
    .as_object()
    .ok_or(Error::InvalidFormat("backup is not a JSON object"))?;
  let people = obj
    .get("people")
    .and_then(Value::as_array)
    .ok_or(Error::InvalidFormat("backup has no `people` array"))?;

  let version = obj.get("version").and_then(Value::as_u64);
  if let Some(v) = version
    && v > u64::from(SNAPSHOT_VERSION)
  {
    warn!(version = v, "backup was written by a newer format version; importing anyway");
  }

  let mut records: Vec<Record> = Vec::with_capacity(people.len());
  // record id → (slot in `records`, index in `people`)
  let mut seen: HashMap<RecordId, (usize, usize)> = HashMap::new();
  let mut skipped = Vec::new();

  for (index, entry) in people.iter().enumerate() {
    let record = match coerce_entry(entry, now) {
      Ok(r) => r,
      Err(reason) => {
        skipped.push(Skipped { index, reason });
        continue;
      }
    };

    match seen.get_mut(&record.id) {
      Some((slot, first_index)) => {
        skipped.push(Skipped { index: *first_index, reason: SkipReason::DuplicateId });
        *first_index = index;
        records[*slot] = record;
      }
      None => {
        seen.insert(record.id.clone(), (records.len(), index));
        records.push(record);
      }
    }
  }

  skipped.sort_by_key(|s| s.index);
  Ok(Decoded { records, skipped, version })
}

// ─── Entry ───────────────────────────────────────────────────────────────────

/// Coerce one untrusted `people` entry into a well-formed record.
///
/// - the name must be a string that is non-blank after trimming;
/// - a missing, empty, or non-scalar id is replaced by a fresh one;
/// - a missing or empty timestamp defaults to `now`.
pub fn coerce_entry(entry: &Value, now: DateTime<Utc>) -> Result<Record, SkipReason> {
  let obj = entry.as_object().ok_or(SkipReason::NotAnObject)?;

  let name = match obj.get("name") {
    None | Some(Value::Null) => return Err(SkipReason::MissingName),
    Some(Value::String(s)) => normalize_name(s).ok_or(SkipReason::BlankName)?,
    Some(_) => return Err(SkipReason::NameNotString),
  };

  let id = coerce_id(obj.get("id")).unwrap_or_else(RecordId::generate);
  let created_at = coerce_timestamp(obj, "createdAt", now);
  let last_called_at = coerce_timestamp(obj, "lastCalledAt", now);

  Ok(Record { id, name, created_at, last_called_at })
}

/// Truthy scalars are kept as text (`true` becomes `"true"`). Empty,
/// zero, `false`, and structured values yield `None`.
fn coerce_id(value: Option<&Value>) -> Option<RecordId> {
  match value? {
    Value::String(s) if !s.is_empty() => Some(RecordId::from(s.as_str())),
    Value::Number(n) if !is_zero(n) => Some(RecordId::from(n.to_string())),
    Value::Bool(true) => Some(RecordId::from("true")),
    _ => None,
  }
}

fn is_zero(n: &Number) -> bool { n.as_f64() == Some(0.0) }

/// Years outside 0000..=9999 cannot be written back as RFC 3339.
fn storable(dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
  (0..=9999).contains(&dt.year()).then_some(dt)
}

fn coerce_timestamp(obj: &Map<String, Value>, field: &'static str, now: DateTime<Utc>) -> DateTime<Utc> {
  let value = match obj.get(field) {
    None | Some(Value::Null) | Some(Value::Bool(false)) => return now,
    Some(Value::String(s)) if s.is_empty() => return now,
    Some(Value::Number(n)) if is_zero(n) => return now,
    Some(v) => v,
  };

  let parsed = match value {
    Value::String(s) => parse_timestamp(s),
    Value::Number(n) => n
      .as_i64()
      .or_else(|| n.as_f64().map(|f| f as i64))
      .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
    _ => None,
  }
  .and_then(storable);

  parsed.unwrap_or_else(|| {
    warn!(field, value = %value, "unreadable timestamp in backup; using current time");
    now
  })
}

/// RFC 3339 first, then a bare date-time or calendar date read as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  let s = s.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
    return Some(naive.and_utc());
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}
