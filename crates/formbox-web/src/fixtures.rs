//! Shared state and request helpers for the router and auth tests.

use std::path::PathBuf;

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use formbox_core::{
  entry::{Entry, EntryQuery, NewEntry},
  store::EntryStore,
};
use formbox_store_sqlite::SqliteStore;
use rand_core::OsRng;
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::{AppState, ServerConfig, action::AjaxResponse, router, settings::default_pages};

/// A store whose writes always fail and which holds nothing.
#[derive(Clone)]
pub struct FailingStore;

impl EntryStore for FailingStore {
  type Error = std::io::Error;

  async fn create_entry(&self, _: NewEntry) -> Result<Entry, Self::Error> {
    Err(std::io::Error::other("disk full"))
  }
  async fn get_entry(&self, _: Uuid) -> Result<Option<Entry>, Self::Error> { Ok(None) }
  async fn list_entries(&self, _: EntryQuery) -> Result<Vec<Entry>, Self::Error> { Ok(vec![]) }
  async fn count_entries(&self) -> Result<usize, Self::Error> { Ok(0) }
}

/// State with admin `admin`/`password`, a page size of 2, and an extra
/// `both` page holding both markers.
pub fn make_state<S: EntryStore>(store: S, password: &str) -> AppState<S> {
  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .unwrap()
    .to_string();

  let mut pages = default_pages();
  pages.insert("both".to_owned(), "<h2>Say hi</h2>[custom_form][form_entries]".to_owned());

  AppState::new(store, ServerConfig {
    host:               "127.0.0.1".to_string(),
    port:               8080,
    base_url:           "http://localhost:8080".to_string(),
    store_path:         PathBuf::from(":memory:"),
    auth_username:      "admin".to_string(),
    auth_password_hash: hash,
    admin_page_size:    2,
    pages,
  })
}

pub async fn sqlite_state() -> AppState<SqliteStore> {
  make_state(SqliteStore::open_in_memory().await.unwrap(), "secret")
}

pub fn auth_header(user: &str, pass: &str) -> String {
  format!("Basic {}", B64.encode(format!("{user}:{pass}")))
}

pub async fn body_string(resp: Response) -> String {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

/// `POST /ajax` with the given content type (if any) and body.
pub async fn post_ajax<S>(state: AppState<S>, content_type: Option<&str>, body: &str) -> Response
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  let mut builder = Request::builder().method("POST").uri("/ajax");
  if let Some(content_type) = content_type {
    builder = builder.header(header::CONTENT_TYPE, content_type);
  }
  router(state).oneshot(builder.body(Body::from(body.to_string())).unwrap()).await.unwrap()
}

pub async fn post_form<S>(state: AppState<S>, body: &str) -> Response
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  post_ajax(state, Some("application/x-www-form-urlencoded"), body).await
}

/// Post a form and decode the JSON envelope, which always comes with 200.
pub async fn submit_json<S>(state: AppState<S>, body: &str) -> AjaxResponse
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  let resp = post_form(state, body).await;
  assert_eq!(resp.status(), StatusCode::OK);
  serde_json::from_str(&body_string(resp).await).unwrap()
}

pub async fn get<S>(state: AppState<S>, uri: &str, auth: Option<&str>) -> Response
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  let mut builder = Request::builder().method("GET").uri(uri);
  if let Some(auth) = auth {
    builder = builder.header(header::AUTHORIZATION, auth);
  }
  router(state).oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}
