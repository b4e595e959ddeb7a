//! The `EntryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `formbox-store-sqlite`).
//! The web layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::entry::{Entry, EntryQuery, NewEntry};

/// Abstraction over a Formbox entry store backend.
///
/// Entries are append-only: there is no update or delete. The store assigns
/// `entry_id` and `created_at`.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait EntryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a validated entry and return it with its assigned identity.
  fn create_entry(
    &self,
    input: NewEntry,
  ) -> impl Future<Output = Result<Entry, Self::Error>> + Send + '_;

  /// Retrieve an entry by id. Returns `None` if not found.
  fn get_entry(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Entry>, Self::Error>> + Send + '_;

  /// List entries newest first (reverse insertion order).
  fn list_entries(
    &self,
    query: EntryQuery,
  ) -> impl Future<Output = Result<Vec<Entry>, Self::Error>> + Send + '_;

  /// Total number of stored entries.
  fn count_entries(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
