//! Entry, a single persisted form submission.
//!
//! Entries are append-only: once the store has assigned an id and a creation
//! timestamp, nothing in Formbox updates or deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::{Field, SubmissionError},
  sanitize::is_email,
};

/// Display format for [`Entry::created_at`], e.g. `2024-05-01 13:45:09`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── Persisted entry ─────────────────────────────────────────────────────────

/// A stored submission. `name` doubles as the record's display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
  pub entry_id:   Uuid,
  pub name:       String,
  pub email:      String,
  pub message:    String,
  pub created_at: DateTime<Utc>,
}

impl Entry {
  /// `created_at` rendered with [`TIMESTAMP_FORMAT`].
  pub fn timestamp(&self) -> String {
    self.created_at.format(TIMESTAMP_FORMAT).to_string()
  }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// The validated input for [`EntryStore::create_entry`].
///
/// Fields are private: a `NewEntry` always has a non-empty name and message
/// and an address that passes [`is_email`].
///
/// [`EntryStore::create_entry`]: crate::store::EntryStore::create_entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
  name:    String,
  email:   String,
  message: String,
}

impl NewEntry {
  /// Check the entry invariants over already-clean values.
  ///
  /// No sanitisation happens here; untrusted request data goes through
  /// [`Submission::validate`](crate::Submission::validate) instead.
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    message: impl Into<String>,
  ) -> Result<Self, SubmissionError> {
    let name    = name.into();
    let email   = email.into();
    let message = message.into();

    if name.is_empty() {
      return Err(SubmissionError::Validation(Field::Name));
    }
    if email.is_empty() || !is_email(&email) {
      return Err(SubmissionError::Validation(Field::Email));
    }
    if message.is_empty() {
      return Err(SubmissionError::Validation(Field::Message));
    }

    Ok(Self { name, email, message })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn email(&self) -> &str { &self.email }

  pub fn message(&self) -> &str { &self.message }

  /// Attach store-assigned identity and timestamp.
  pub fn into_entry(self, entry_id: Uuid, created_at: DateTime<Utc>) -> Entry {
    Entry {
      entry_id,
      name: self.name,
      email: self.email,
      message: self.message,
      created_at,
    }
  }
}

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`EntryStore::list_entries`](crate::store::EntryStore::list_entries).
///
/// The default query is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryQuery {
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

impl EntryQuery {
  /// One 1-based page of `per_page` entries.
  pub fn page(page: usize, per_page: usize) -> Self {
    let page = page.max(1);
    Self {
      limit:  Some(per_page),
      offset: Some((page - 1).saturating_mul(per_page)),
    }
  }
}
