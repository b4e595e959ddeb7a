//! `GET /{slug}`: configured pages with their markers expanded.

use axum::{
  extract::{Path, State},
  response::Html,
};
use formbox_core::{entry::EntryQuery, store::EntryStore};

use crate::{
  AppState,
  error::Error,
  handlers::store_err,
  markers::{self, Marker},
  render,
};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Html<String>, Error>
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  let content = state.config.pages.get(&slug).ok_or(Error::NotFound)?;

  // Only hit the store when the page actually lists entries.
  let entries = if markers::contains(content, Marker::FormEntries) {
    state
      .store
      .list_entries(EntryQuery::default())
      .await
      .map_err(store_err)?
  } else {
    Vec::new()
  };

  let body = markers::expand(content, |marker| match marker {
    Marker::CustomForm => render::form().to_owned(),
    Marker::FormEntries => render::entries_table(&entries),
  });

  Ok(Html(render::page(&slug, &body, &state.config.base_url)))
}
