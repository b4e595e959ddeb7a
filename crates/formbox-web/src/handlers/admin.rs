//! `GET /admin/entries`: the authenticated admin list view.

use axum::{
  extract::{Query, State},
  response::Html,
};
use formbox_core::{entry::EntryQuery, store::EntryStore};
use serde::Deserialize;

use crate::{
  AppState,
  admin::{Paging, list_view},
  auth::AdminUser,
  error::Error,
  handlers::store_err,
  render,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// 1-based page number; defaults to the first page.
  pub paged: Option<usize>,
}

pub async fn entries<S>(
  admin: AdminUser,
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Html<String>, Error>
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  let per_page = state.config.admin_page_size.max(1);
  let total = state.store.count_entries().await.map_err(store_err)?;

  let mut paging = Paging { page: params.paged.unwrap_or(1).max(1), per_page, total };
  paging.page = paging.page.min(paging.pages());

  tracing::debug!(user = %admin.username, page = paging.page, "rendering admin entry list");

  let entries = state
    .store
    .list_entries(EntryQuery::page(paging.page, per_page))
    .await
    .map_err(store_err)?;

  let table = list_view(&entries, state.columns.as_ref(), paging);
  Ok(Html(render::admin_page("Form Entries", &table)))
}
