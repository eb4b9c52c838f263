//! SQL schema for the Ringback SQLite store.
//!
//! The schema version lives in `PRAGMA user_version`. Only version 1 exists;
//! a file stamped with a newer version is refused rather than guessed at.

/// Version written by [`SCHEMA`].
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per person. Timestamps are RFC 3339 UTC text.
CREATE TABLE IF NOT EXISTS people (
    id              TEXT PRIMARY KEY,
    name            TEXT NOT NULL CHECK (length(trim(name)) > 0),
    created_at      TEXT NOT NULL,
    last_called_at  TEXT NOT NULL
);

PRAGMA user_version = 1;
";
