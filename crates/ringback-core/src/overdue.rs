//! Overdue ordering, name search, and status bands for display.
//!
//! These are pure helpers for whatever front end renders the working set.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::record::Record;

/// Days at which a contact moves from [`Status::Connected`] to
/// [`Status::CheckIn`].
pub const CHECK_IN_DAYS: i64 = 21;

/// Days at which a contact becomes [`Status::BeenAWhile`].
pub const BEEN_A_WHILE_DAYS: i64 = 90;

/// How overdue a contact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
  Connected,
  CheckIn,
  BeenAWhile,
}

impl Status {
  pub fn for_days(days: i64) -> Self {
    if days >= BEEN_A_WHILE_DAYS {
      Self::BeenAWhile
    } else if days >= CHECK_IN_DAYS {
      Self::CheckIn
    } else {
      Self::Connected
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Connected => "Connected",
      Self::CheckIn => "Check In",
      Self::BeenAWhile => "Been awhile",
    }
  }
}

/// Whole calendar days between the date of `last_called_at` and `today`,
/// both taken in the time zone `tz`. Never negative.
pub fn days_since<Tz: TimeZone>(
  last_called_at: DateTime<chrono::Utc>,
  today: NaiveDate,
  tz: &Tz,
) -> i64 {
  let from = last_called_at.with_timezone(tz).date_naive();
  (today - from).num_days().max(0)
}

/// Oldest `last_called_at` first.
pub fn by_most_overdue(a: &Record, b: &Record) -> Ordering {
  a.last_called_at.cmp(&b.last_called_at)
}

/// Case-insensitive substring match on the name. A blank query matches
/// everything.
pub fn matches_query(record: &Record, query: &str) -> bool {
  let q = query.trim().to_lowercase();
  q.is_empty() || record.name.to_lowercase().contains(&q)
}

/// Records matching `query`, most overdue first.
pub fn overdue_first<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
  let mut rows: Vec<&Record> = records.iter().filter(|r| matches_query(r, query)).collect();
  rows.sort_by(|a, b| by_most_overdue(a, b));
  rows
}
