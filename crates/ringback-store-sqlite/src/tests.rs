//! Integration tests for `SqliteStore` against in-memory and file databases.

use chrono::{DateTime, TimeZone, Utc};
use ringback_core::{
  record::{Record, RecordId},
  store::{FailureKind, RecordStore, StoreError},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn at(day: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 5, day, 10, 30, 0).unwrap()
}

fn record(id: &str, name: &str) -> Record {
  Record {
    id:             id.into(),
    name:           name.into(),
    created_at:     at(1),
    last_called_at: at(2),
  }
}

fn sorted(mut records: Vec<Record>) -> Vec<Record> {
  records.sort_by(|a, b| a.id.cmp(&b.id));
  records
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_returns_nothing() {
  let s = store().await;
  assert!(s.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn upsert_then_get_all_contains_exactly_one() {
  let s = store().await;
  let r = record("a", "Ada");

  s.upsert(r.clone()).await.unwrap();

  let all = s.get_all().await.unwrap();
  let matching: Vec<_> = all.iter().filter(|x| x.id == r.id).collect();
  assert_eq!(matching.len(), 1);
  assert_eq!(matching[0], &r);
}

#[tokio::test]
async fn upsert_is_idempotent() {
  let s = store().await;
  let r = record("a", "Ada");

  s.upsert(r.clone()).await.unwrap();
  s.upsert(r.clone()).await.unwrap();

  assert_eq!(s.get_all().await.unwrap(), vec![r]);
}

#[tokio::test]
async fn upsert_overwrites_same_id() {
  let s = store().await;
  s.upsert(record("a", "Ada")).await.unwrap();

  let mut renamed = record("a", "Ada Lovelace");
  renamed.last_called_at = at(20);
  s.upsert(renamed.clone()).await.unwrap();

  assert_eq!(s.get_all().await.unwrap(), vec![renamed]);
}

#[tokio::test]
async fn timestamps_survive_with_subsecond_precision() {
  let s = store().await;
  let mut r = record("a", "Ada");
  r.last_called_at = Utc.timestamp_millis_opt(1_717_171_717_123).unwrap();

  s.upsert(r.clone()).await.unwrap();
  assert_eq!(s.get_all().await.unwrap(), vec![r]);
}

#[tokio::test]
async fn rejected_write_is_classified_as_write_failure() {
  let s = store().await;
  let err = s.upsert(record("a", "   ")).await.unwrap_err();
  assert!(matches!(err, Error::Write(_)));
  assert_eq!(err.kind(), FailureKind::Write);
  assert!(s.get_all().await.unwrap().is_empty());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_record() {
  let s = store().await;
  s.upsert(record("a", "Ada")).await.unwrap();
  s.upsert(record("b", "Bob")).await.unwrap();

  s.delete(RecordId::from("a")).await.unwrap();

  assert_eq!(s.get_all().await.unwrap(), vec![record("b", "Bob")]);
}

#[tokio::test]
async fn delete_missing_is_noop() {
  let s = store().await;
  s.upsert(record("a", "Ada")).await.unwrap();

  s.delete(RecordId::from("nope")).await.unwrap();

  assert_eq!(s.get_all().await.unwrap(), vec![record("a", "Ada")]);
}

// ─── Replace all ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_all_discards_prior_contents() {
  let s = store().await;
  s.upsert(record("old-1", "Old One")).await.unwrap();
  s.upsert(record("old-2", "Old Two")).await.unwrap();

  let incoming = vec![record("n1", "Nia"), record("n2", "Ned")];
  s.replace_all(incoming.clone()).await.unwrap();

  assert_eq!(sorted(s.get_all().await.unwrap()), sorted(incoming));
}

#[tokio::test]
async fn replace_all_is_idempotent() {
  let s = store().await;
  let incoming = vec![record("n1", "Nia"), record("n2", "Ned")];

  s.replace_all(incoming.clone()).await.unwrap();
  s.replace_all(incoming.clone()).await.unwrap();

  assert_eq!(sorted(s.get_all().await.unwrap()), sorted(incoming));
}

#[tokio::test]
async fn replace_all_with_empty_clears_store() {
  let s = store().await;
  s.upsert(record("a", "Ada")).await.unwrap();

  s.replace_all(Vec::new()).await.unwrap();

  assert!(s.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn replace_all_later_duplicate_wins() {
  let s = store().await;
  s.replace_all(vec![record("a", "First"), record("a", "Second")])
    .await
    .unwrap();

  assert_eq!(s.get_all().await.unwrap(), vec![record("a", "Second")]);
}

#[tokio::test]
async fn failed_replace_all_keeps_prior_set() {
  let s = store().await;
  s.upsert(record("a", "Ada")).await.unwrap();

  let err = s
    .replace_all(vec![record("n1", "Nia"), record("n2", "")])
    .await
    .unwrap_err();
  assert_eq!(err.kind(), FailureKind::Write);

  assert_eq!(s.get_all().await.unwrap(), vec![record("a", "Ada")]);
}

// ─── Decoding ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unreadable_timestamp_is_reported_as_corrupt() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute(
        "INSERT INTO people (id, name, created_at, last_called_at)
         VALUES ('x', 'Xan', 'yesterday-ish', '2024-05-01T00:00:00+00:00')",
        [],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let err = s.get_all().await.unwrap_err();
  assert_eq!(err.kind(), FailureKind::Corrupt);
  match err {
    Error::Decode { id, column, .. } => {
      assert_eq!(id, "x");
      assert_eq!(column, "created_at");
    }
    other => panic!("unexpected error: {other}"),
  }
}

// ─── Files ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn records_persist_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("people.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert(record("a", "Ada")).await.unwrap();
  }

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.get_all().await.unwrap(), vec![record("a", "Ada")]);
}

#[tokio::test]
async fn newer_schema_version_is_refused() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("future.db");

  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 7;").unwrap();
  }

  let err = SqliteStore::open(&path).await.err().unwrap();
  assert!(matches!(err, Error::UnsupportedSchema { found: 7, supported: 1 }));
  assert_eq!(err.kind(), FailureKind::Unavailable);
}

#[tokio::test]
async fn unopenable_path_is_unavailable() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("missing-dir").join("people.db");

  let err = SqliteStore::open(&path).await.err().unwrap();
  assert_eq!(err.kind(), FailureKind::Unavailable);
}
