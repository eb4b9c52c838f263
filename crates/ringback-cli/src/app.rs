//! Subcommand handlers. Each one drives the [`ContactService`] and prints
//! what it returns.

use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use ringback_core::{
  Error, Record, RecordId,
  overdue::{Status, days_since, overdue_first},
  store::RecordStore,
};
use ringback_service::{ContactInput, ContactService};

/// Parse a `YYYY-MM-DD` contact date as local midnight.
pub fn parse_contact_date(s: &str) -> Result<DateTime<Utc>> {
  let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
    .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))?;
  local_midnight(date).with_context(|| format!("local midnight does not exist on {date}"))
}

fn local_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
  let midnight = date.and_hms_opt(0, 0, 0)?;
  Local
    .from_local_datetime(&midnight)
    .earliest()
    .map(|dt| dt.with_timezone(&Utc))
}

// ─── Listing ──────────────────────────────────────────────────────────────────

fn dot(status: Status) -> &'static str {
  match status {
    Status::Connected => "●",
    Status::CheckIn => "◐",
    Status::BeenAWhile => "○",
  }
}

/// One display line per record, most overdue first.
pub fn render_list(records: &[Record], query: &str, today: NaiveDate) -> Vec<String> {
  overdue_first(records, query)
    .into_iter()
    .map(|r| {
      let days = days_since(r.last_called_at, today, &Local);
      let status = Status::for_days(days);
      let plural = if days == 1 { "" } else { "s" };
      format!(
        "{} {:<12} {:<24} {:>5} day{plural} since  {}",
        dot(status),
        status.label(),
        r.name,
        days,
        r.id
      )
    })
    .collect()
}

pub fn list<S: RecordStore>(svc: &ContactService<S>, query: &str) {
  let lines = render_list(svc.records(), query, Local::now().date_naive());
  if lines.is_empty() {
    println!("No contacts yet. Add one with `ringback add <name>`.");
  }
  for line in lines {
    println!("{line}");
  }
}

// ─── Mutations ────────────────────────────────────────────────────────────────

pub async fn add<S: RecordStore>(
  svc: &mut ContactService<S>,
  name: String,
  date: Option<&str>,
) -> Result<()> {
  let input = ContactInput {
    id: None,
    name,
    last_called_at: date.map(parse_contact_date).transpose()?,
  };
  let record = svc.add_or_update(input).await.context("failed to add contact")?;
  println!("Added {} ({})", record.name, record.id);
  Ok(())
}

pub async fn edit<S: RecordStore>(
  svc: &mut ContactService<S>,
  id: RecordId,
  name: Option<String>,
  date: Option<&str>,
) -> Result<()> {
  let existing = svc
    .get(&id)
    .cloned()
    .ok_or_else(|| Error::RecordNotFound(id.clone()))?;

  let input = ContactInput {
    id:             Some(id),
    name:           name.unwrap_or(existing.name),
    last_called_at: Some(match date {
      Some(d) => parse_contact_date(d)?,
      None => existing.last_called_at,
    }),
  };
  let record = svc.add_or_update(input).await.context("failed to save contact")?;
  println!("Saved {}", record.name);
  Ok(())
}

pub async fn called<S: RecordStore>(svc: &mut ContactService<S>, id: RecordId) -> Result<()> {
  let record = svc.mark_contacted(&id).await.context("failed to mark contacted")?;
  println!("Marked {} as contacted", record.name);
  Ok(())
}

pub async fn remove<S: RecordStore>(svc: &mut ContactService<S>, id: RecordId) -> Result<()> {
  let name = svc.get(&id).map(|r| r.name.clone());
  svc.remove(&id).await.context("failed to delete contact")?;
  match name {
    Some(name) => println!("Deleted {name}"),
    None => println!("No contact with id {id}"),
  }
  Ok(())
}

// ─── Backup ───────────────────────────────────────────────────────────────────

pub fn export<S: RecordStore>(svc: &ContactService<S>, output: Option<&Path>) -> Result<()> {
  let json = svc.export_snapshot().to_json()?;
  match output {
    Some(path) => {
      std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;
      eprintln!("Exported {} contacts to {}", svc.records().len(), path.display());
    }
    None => {
      let mut stdout = std::io::stdout().lock();
      writeln!(stdout, "{json}").context("failed to write to stdout")?;
    }
  }
  Ok(())
}

pub async fn import<S: RecordStore>(svc: &mut ContactService<S>, file: &Path) -> Result<()> {
  let text = std::fs::read_to_string(file)
    .with_context(|| format!("failed to read {}", file.display()))?;
  let imported = svc.import_snapshot(&text).await.context("import failed")?;
  println!("Import complete: {} contacts", imported.len());
  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  #[test]
  fn contact_date_is_local_midnight() {
    let parsed = parse_contact_date("2024-02-29").unwrap();
    let local = parsed.with_timezone(&Local);
    assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(local.format("%H:%M:%S").to_string(), "00:00:00");
  }

  #[test]
  fn bad_contact_date_is_an_error() {
    assert!(parse_contact_date("29/02/2024").is_err());
    assert!(parse_contact_date("2024-02-30").is_err());
  }

  #[test]
  fn render_list_orders_and_labels() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let noon = |days_ago: i64| {
      local_midnight(today - Duration::days(days_ago)).unwrap() + Duration::hours(12)
    };
    let rec = |id: &str, name: &str, days_ago| Record {
      id:             id.into(),
      name:           name.into(),
      created_at:     noon(days_ago),
      last_called_at: noon(days_ago),
    };
    let records = vec![rec("a", "Ada", 1), rec("b", "Bob", 95), rec("c", "Cy", 30)];

    let lines = render_list(&records, "", today);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Bob") && lines[0].contains("Been awhile") && lines[0].contains("95 days"));
    assert!(lines[1].contains("Cy") && lines[1].contains("Check In"));
    assert!(lines[2].contains("Ada") && lines[2].contains("1 day since"));

    let filtered = render_list(&records, "cy", today);
    assert_eq!(filtered.len(), 1);
  }
}
