//! HTTP layer for Formbox.
//!
//! Exposes an axum [`Router`] that serves configured pages (with the
//! `[custom_form]` and `[form_entries]` markers expanded), accepts form
//! submissions on `POST /ajax`, and renders the admin list view, all backed by
//! any [`EntryStore`].

pub mod action;
pub mod admin;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod markers;
pub mod render;
pub mod settings;

#[cfg(test)]
mod fixtures;

pub use error::Error;
pub use settings::ServerConfig;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use formbox_core::store::EntryStore;
use tower_http::trace::TraceLayer;

use admin::{AdminColumns, EntryColumns};
use auth::AuthConfig;
use handlers::{admin as admin_handlers, ajax, assets, page};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: EntryStore> {
  pub store:   Arc<S>,
  pub columns: Arc<dyn AdminColumns>,
  pub config:  Arc<ServerConfig>,
  pub auth:    Arc<AuthConfig>,
}

impl<S: EntryStore> AppState<S> {
  /// State for `store` with the admin account from `config` and the
  /// [`EntryColumns`] admin extension.
  pub fn new(store: S, config: ServerConfig) -> Self {
    let auth = AuthConfig {
      username:      config.auth_username.clone(),
      password_hash: config.auth_password_hash.clone(),
    };
    Self {
      store:   Arc::new(store),
      columns: Arc::new(EntryColumns),
      config:  Arc::new(config),
      auth:    Arc::new(auth),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the Formbox server.
///
/// Static routes take precedence over the `/{slug}` page route.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/ajax",           post(ajax::handler::<S>))
    .route("/assets/form.js", get(assets::form_js))
    .route("/admin/entries",  get(admin_handlers::entries::<S>))
    .route("/{slug}",         get(page::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────


#[cfg(test)]
mod tests {
  use axum::http::{StatusCode, header};
  use formbox_core::entry::{EntryQuery, NewEntry};
  use uuid::Uuid;

  use super::*;
  use crate::{
    action::AjaxResponse,
    admin::render_column,
    fixtures::{
      FailingStore, auth_header, body_string, get, make_state, post_ajax, post_form,
      sqlite_state, submit_json,
    },
  };

  // ── Submission ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn valid_submission_creates_one_entry() {
    let state = sqlite_state().await;
    let resp  = submit_json(
      state.clone(),
      "action=submit_form&name=Bob&email=bob%40example.com&message=Hello",
    ).await;

    assert_eq!(resp, AjaxResponse::success("Form submitted successfully."));
    assert_eq!(state.store.count_entries().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn missing_field_is_invalid_request() {
    let state = sqlite_state().await;
    for body in [
      "action=submit_form&email=bob%40example.com&message=Hello",
      "action=submit_form&name=Bob&message=Hello",
      "action=submit_form&name=Bob&email=bob%40example.com",
      "action=submit_form",
    ] {
      let resp = submit_json(state.clone(), body).await;
      assert_eq!(resp, AjaxResponse::error("Invalid request."), "{body}");
    }
    assert_eq!(state.store.count_entries().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn malformed_or_empty_values_are_invalid_input() {
    let state = sqlite_state().await;
    for body in [
      "action=submit_form&name=Bob&email=not-an-email&message=Hello",
      "action=submit_form&name=Bob&email=&message=Hello",
      "action=submit_form&name=&email=bob%40example.com&message=Hello",
      "action=submit_form&name=Bob&email=bob%40example.com&message=",
      "action=submit_form&name=%3Cb%3E%3C%2Fb%3E&email=bob%40example.com&message=Hello",
    ] {
      let resp = submit_json(state.clone(), body).await;
      assert_eq!(resp, AjaxResponse::error("Invalid input."), "{body}");
    }
    assert_eq!(state.store.count_entries().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn unknown_or_missing_action_is_rejected() {
    for body in ["action=drop_tables&name=Bob", "name=Bob", ""] {
      let resp = post_form(sqlite_state().await, body).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
      assert_eq!(body_string(resp).await, "0");
    }
  }

  #[tokio::test]
  async fn non_form_bodies_are_rejected_like_unknown_actions() {
    let state = sqlite_state().await;
    for (content_type, body) in [
      (Some("application/json"), r#"{"action":"submit_form"}"#),
      (None, ""),
    ] {
      let resp = post_ajax(state.clone(), content_type, body).await;
      assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{content_type:?}");
      assert_eq!(body_string(resp).await, "0");
    }
    assert_eq!(state.store.count_entries().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn store_failure_is_reported() {
    let resp = submit_json(
      make_state(FailingStore, "secret"),
      "action=submit_form&name=Bob&email=bob%40example.com&message=Hello",
    ).await;
    assert_eq!(resp, AjaxResponse::error("Failed to save the form data."));
  }

  // ── Pages ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn contact_page_embeds_form_and_script() {
    let resp = get(sqlite_state().await, "/contact", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains(r#"<form id="customForm" method="post">"#));
    assert!(html.contains("/assets/form.js"));
    assert!(!html.contains("[custom_form]"));
  }

  #[tokio::test]
  async fn entries_page_with_empty_store_has_headers_only() {
    let html = body_string(get(sqlite_state().await, "/entries", None).await).await;
    assert!(html.contains("<th>Name</th><th>Email</th><th>Message</th><th>Date</th>"));
    assert!(!html.contains("<td>"));
  }

  #[tokio::test]
  async fn entries_page_escapes_stored_markup() {
    let state = sqlite_state().await;
    state
      .store
      .create_entry(NewEntry::new("Alice", "a@example.com", "Hi <script>").unwrap())
      .await
      .unwrap();

    let html = body_string(get(state, "/entries", None).await).await;
    assert!(html.contains("<td>Alice</td><td>a@example.com</td><td>Hi &lt;script&gt;</td>"));
    assert!(!html.contains("Hi <script>"));
  }

  #[tokio::test]
  async fn entries_page_lists_newest_first() {
    let state = sqlite_state().await;
    for name in ["Older", "Newer"] {
      submit_json(
        state.clone(),
        &format!("action=submit_form&name={name}&email=x%40example.com&message=Hi"),
      ).await;
    }

    let html = body_string(get(state, "/both", None).await).await;
    assert!(html.contains("<h2>Say hi</h2>"));
    assert!(html.find("Newer").unwrap() < html.find("Older").unwrap());
  }

  #[tokio::test]
  async fn unknown_page_returns_404() {
    let resp = get(sqlite_state().await, "/nope", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn script_is_served_as_javascript() {
    let resp = get(sqlite_state().await, "/assets/form.js", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap().to_owned();
    assert!(ct.starts_with("text/javascript"), "Content-Type: {ct}");
    let script = body_string(resp).await;
    assert!(script.contains("submit_form"));
    // Non-2xx answers (the bare `0`) are reported before any JSON parsing.
    assert!(script.find("res.ok").unwrap() < script.find("res.json()").unwrap());
  }

  // ── Admin ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submitted_entry_renders_in_admin_email_column() {
    let state = sqlite_state().await;
    submit_json(
      state.clone(),
      "action=submit_form&name=Bob&email=bob%40example.com&message=Hello",
    ).await;

    let entries = state.store.list_entries(EntryQuery::default()).await.unwrap();
    let id      = entries[0].entry_id;

    let cell = render_column(state.store.as_ref(), &EntryColumns, "email", id).await.unwrap();
    assert_eq!(cell.as_deref(), Some("bob@example.com"));

    let other = render_column(state.store.as_ref(), &EntryColumns, "author", id).await.unwrap();
    assert_eq!(other, None);

    let missing =
      render_column(state.store.as_ref(), &EntryColumns, "email", Uuid::new_v4()).await.unwrap();
    assert_eq!(missing, None);
  }

  #[tokio::test]
  async fn admin_requires_credentials() {
    let state = sqlite_state().await;

    let resp = get(state.clone(), "/admin/entries", None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
      resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
      auth::ADMIN_CHALLENGE,
    );

    let bad = auth_header("admin", "wrong");
    let resp = get(state, "/admin/entries", Some(&bad)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn public_pages_ignore_admin_credentials() {
    let bad  = auth_header("admin", "wrong");
    let resp = get(sqlite_state().await, "/contact", Some(&bad)).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn admin_lists_extension_columns_with_paging() {
    let state = sqlite_state().await;
    for name in ["Ann", "Ben", "Cat"] {
      submit_json(
        state.clone(),
        &format!("action=submit_form&name={name}&email=x%40example.com&message=%3Cb%3Ehi%3C%2Fb%3E+there"),
      ).await;
    }
    let auth = auth_header("admin", "secret");

    let resp = get(state.clone(), "/admin/entries", Some(&auth)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("<th class=\"column-email\">Email</th>"));
    assert!(html.contains("<th class=\"column-timestamp\">Date Submitted</th>"));
    assert!(html.contains("<td class=\"column-title\">Cat</td>"));
    assert!(html.contains("<td class=\"column-message\">hi there</td>"));
    assert!(!html.contains("Ann"));
    assert!(html.contains("3 items"));
    assert!(html.contains("Page 1 of 2"));

    let html = body_string(get(state, "/admin/entries?paged=2", Some(&auth)).await).await;
    assert!(html.contains("<td class=\"column-title\">Ann</td>"));
    assert!(html.contains("Page 2 of 2"));
  }
}
