//! `GET /assets/form.js`: the client-side submission script.

use axum::{http::header, response::IntoResponse};

pub const FORM_JS: &str = include_str!("../../assets/form.js");

pub async fn form_js() -> impl IntoResponse {
  ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], FORM_JS)
}
