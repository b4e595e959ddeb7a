//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use formbox_core::entry::Entry;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` that builds a [`RawEntry`].
pub const ENTRY_COLUMNS: &str = "entry_id, name, email, message, created_at";

/// Raw strings read directly from an `entries` row.
pub struct RawEntry {
  pub entry_id:   String,
  pub name:       String,
  pub email:      String,
  pub message:    String,
  pub created_at: String,
}

impl RawEntry {
  /// Map a row selected with [`ENTRY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      entry_id:   row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      message:    row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_entry(self) -> Result<Entry> {
    Ok(Entry {
      entry_id:   decode_uuid(&self.entry_id)?,
      name:       self.name,
      email:      self.email,
      message:    self.message,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
