//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use ringback_core::{
  record::{Record, RecordId},
  store::RecordStore,
};
use tracing::debug;

use crate::{
  encode::RawRecord,
  schema::{SCHEMA, SCHEMA_VERSION},
  Error, Result,
};

const UPSERT_SQL: &str = "
  INSERT INTO people (id, name, created_at, last_called_at)
  VALUES (?1, ?2, ?3, ?4)
  ON CONFLICT (id) DO UPDATE SET
    name           = excluded.name,
    created_at     = excluded.created_at,
    last_called_at = excluded.last_called_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Ringback record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await.map_err(Error::Open)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await.map_err(Error::Open)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let found: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?))
      .await
      .map_err(Error::Open)?;

    if found > SCHEMA_VERSION {
      return Err(Error::UnsupportedSchema { found, supported: SCHEMA_VERSION });
    }

    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::Open)?;
    Ok(())
  }
}

fn insert_raw(conn: &rusqlite::Connection, raw: &RawRecord) -> rusqlite::Result<usize> {
  conn.execute(
    UPSERT_SQL,
    rusqlite::params![raw.id, raw.name, raw.created_at, raw.last_called_at],
  )
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn get_all(&self) -> Result<Vec<Record>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name, created_at, last_called_at FROM people")?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Read)?;

    debug!(count = raws.len(), "loaded records");
    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn upsert(&self, record: Record) -> Result<()> {
    let raw = RawRecord::from_record(&record);
    debug!(id = %record.id, "upserting record");

    self
      .conn
      .call(move |conn| {
        insert_raw(conn, &raw)?;
        Ok(())
      })
      .await
      .map_err(Error::Write)
  }

  async fn delete(&self, id: RecordId) -> Result<()> {
    debug!(%id, "deleting record");
    let id_str = id.into_inner();

    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id_str])?;
        Ok(())
      })
      .await
      .map_err(Error::Write)
  }

  async fn replace_all(&self, records: Vec<Record>) -> Result<()> {
    let raws: Vec<RawRecord> = records.iter().map(RawRecord::from_record).collect();
    debug!(count = raws.len(), "replacing all records");

    // Clear and rewrite inside one transaction: readers and a crash both see
    // either the old set or the new one.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM people", [])?;
        for raw in &raws {
          insert_raw(&tx, raw)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await
      .map_err(Error::Write)
  }
}
