//! Contact service for Ringback.
//!
//! [`ContactService`] owns the session's working set of records and sits
//! between a front end and any [`RecordStore`]. Every mutation is written
//! through to the store first; the working set changes only once the write
//! has succeeded, so it never shows a record that failed to persist.
//!
//! ```rust,ignore
//! let store = SqliteStore::open("people.db").await?;
//! let mut contacts = ContactService::load(store).await?;
//! let ada = contacts.add_or_update(ContactInput::new("Ada")).await?;
//! contacts.mark_contacted(&ada.id).await?;
//! ```

use chrono::{DateTime, Utc};
use ringback_backup::Snapshot;
use ringback_core::{
  Error, Record, RecordId, Result,
  record::normalize_name,
  store::{FailureKind, RecordStore, StoreError},
};
use tracing::{debug, info, warn};

// ─── Input ────────────────────────────────────────────────────────────────────

/// What a front end submits when adding or editing a contact.
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
  /// `None` adds a new contact; `Some` edits (or creates) that id.
  pub id:             Option<RecordId>,
  pub name:           String,
  /// When the person was last contacted; `None` means now.
  pub last_called_at: Option<DateTime<Utc>>,
}

impl ContactInput {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }
}

// ─── Service ──────────────────────────────────────────────────────────────────

/// The session's working set plus the store it mirrors.
///
/// The store is the source of truth; the working set is rebuilt from it by
/// [`ContactService::load`] and [`ContactService::reload`].
#[derive(Debug)]
pub struct ContactService<S> {
  store:   S,
  records: Vec<Record>,
}

impl<S: RecordStore> ContactService<S> {
  /// Read every record from `store` into a fresh working set.
  pub async fn load(store: S) -> Result<Self> {
    let records = store.get_all().await.map_err(Error::from_store)?;
    info!(count = records.len(), "loaded contacts");
    Ok(Self { store, records })
  }

  /// Discard the working set and read it again from the store.
  pub async fn reload(&mut self) -> Result<()> {
    self.records = self.store.get_all().await.map_err(Error::from_store)?;
    Ok(())
  }

  /// The working set, in no particular order.
  pub fn records(&self) -> &[Record] { &self.records }

  pub fn get(&self, id: &RecordId) -> Option<&Record> {
    self.records.iter().find(|r| &r.id == id)
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Add a contact, or edit the one named by `input.id`.
  pub async fn add_or_update(&mut self, input: ContactInput) -> Result<Record> {
    self.add_or_update_at(input, Utc::now()).await
  }

  /// [`add_or_update`](Self::add_or_update) with an explicit clock reading.
  ///
  /// An existing record keeps its id and `created_at`; name and
  /// `last_called_at` always come from `input`.
  pub async fn add_or_update_at(
    &mut self,
    input: ContactInput,
    now: DateTime<Utc>,
  ) -> Result<Record> {
    let name = normalize_name(&input.name).ok_or(Error::BlankName)?;
    let id = input.id.unwrap_or_else(RecordId::generate);
    let created_at = self.get(&id).map_or(now, |existing| existing.created_at);

    let record = Record {
      id,
      name,
      created_at,
      last_called_at: input.last_called_at.unwrap_or(now),
    };

    self.store.upsert(record.clone()).await.map_err(Error::from_store)?;
    self.put_local(record.clone());
    Ok(record)
  }

  /// Record that `id` was contacted just now.
  pub async fn mark_contacted(&mut self, id: &RecordId) -> Result<Record> {
    self.mark_contacted_at(id, Utc::now()).await
  }

  /// Set `last_called_at` of `id` to `at`, leaving every other field alone.
  pub async fn mark_contacted_at(&mut self, id: &RecordId, at: DateTime<Utc>) -> Result<Record> {
    let updated = self
      .get(id)
      .ok_or_else(|| Error::RecordNotFound(id.clone()))?
      .contacted_at(at);

    self.store.upsert(updated.clone()).await.map_err(Error::from_store)?;
    self.put_local(updated.clone());
    debug!(%id, "marked contacted");
    Ok(updated)
  }

  /// Delete `id`. Deleting an unknown id succeeds and changes nothing.
  pub async fn remove(&mut self, id: &RecordId) -> Result<()> {
    self.store.delete(id.clone()).await.map_err(Error::from_store)?;
    self.records.retain(|r| &r.id != id);
    Ok(())
  }

  fn put_local(&mut self, record: Record) {
    match self.records.iter_mut().find(|r| r.id == record.id) {
      Some(slot) => *slot = record,
      None => self.records.push(record),
    }
  }

  // ── Backup ────────────────────────────────────────────────────────────

  /// A snapshot of the whole working set.
  pub fn export_snapshot(&self) -> Snapshot { self.export_snapshot_at(Utc::now()) }

  pub fn export_snapshot_at(&self, exported_at: DateTime<Utc>) -> Snapshot {
    Snapshot::new(self.records.clone(), exported_at)
  }

  /// Replace every stored record with the contents of a backup document.
  ///
  /// Entries without a usable name are skipped. On any error nothing in the
  /// working set changes.
  pub async fn import_snapshot(&mut self, text: &str) -> Result<&[Record]> {
    self.import_snapshot_at(text, Utc::now()).await
  }

  /// [`import_snapshot`](Self::import_snapshot) with an explicit clock
  /// reading, used for any timestamp the backup is missing.
  pub async fn import_snapshot_at(&mut self, text: &str, now: DateTime<Utc>) -> Result<&[Record]> {
    let decoded = ringback_backup::decode_snapshot(text, now).map_err(import_error)?;

    for skipped in &decoded.skipped {
      warn!(index = skipped.index, reason = ?skipped.reason, "skipped backup entry");
    }

    self
      .store
      .replace_all(decoded.records.clone())
      .await
      .map_err(|e| match e.kind() {
        FailureKind::Write => Error::ImportFailed(Box::new(e)),
        _ => Error::from_store(e),
      })?;

    info!(
      imported = decoded.records.len(),
      skipped = decoded.skipped.len(),
      "imported backup"
    );
    self.records = decoded.records;
    Ok(&self.records)
  }
}

fn import_error(err: ringback_backup::Error) -> Error {
  match err {
    ringback_backup::Error::InvalidFormat(msg) => Error::InvalidBackupFormat(msg.to_owned()),
    other => Error::ImportFailed(Box::new(other)),
  }
}
