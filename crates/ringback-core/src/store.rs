//! The `RecordStore` trait and the failure classification backends report.
//!
//! The trait is implemented by storage backends (e.g. `ringback-store-sqlite`).
//! The contact service depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::record::{Record, RecordId};

// ─── Failure classification ──────────────────────────────────────────────────

/// Coarse category of a backend failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// The engine could not be opened or read from.
  Unavailable,
  /// A write was rejected; nothing from it was persisted.
  Write,
  /// Stored data exists but could not be decoded.
  Corrupt,
}

/// Implemented by every backend error type so callers can classify failures
/// without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> FailureKind;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Durable keyed storage of contact records.
///
/// The store exclusively owns the durable copy of every record. All queries
/// are full scans; callers sort and filter.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: StoreError;

  /// Every stored record, in no particular order.
  fn get_all(&self) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Insert `record`, or overwrite the stored record with the same id.
  ///
  /// Idempotent and all-or-nothing: no partial record is ever written.
  fn upsert(&self, record: Record) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove the record with `id`. Removing a missing id is not an error.
  fn delete(&self, id: RecordId) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Discard the entire stored set and install `records` in its place.
  ///
  /// Readers observe either the old set or the complete new set, never a
  /// mix. Records are written in order, so a later duplicate id overwrites
  /// an earlier one.
  fn replace_all(
    &self,
    records: Vec<Record>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
