//! SQL schema for the Formbox SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Entries are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS entries (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,  -- insertion order
    entry_id    TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL CHECK (name    != ''),
    email       TEXT NOT NULL CHECK (email   != ''),
    message     TEXT NOT NULL CHECK (message != ''),
    created_at  TEXT NOT NULL                       -- ISO 8601 UTC; server-assigned
);

PRAGMA user_version = 1;
";
