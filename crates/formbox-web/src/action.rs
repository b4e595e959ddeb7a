//! The asynchronous action table and its JSON response envelope.
//!
//! `POST /ajax` carries an `action` field naming the operation. Each name
//! maps to exactly one [`Action`]; dispatch happens in
//! [`handlers::ajax`](crate::handlers::ajax).

use axum::{
  Json,
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Operations reachable through `POST /ajax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  /// Validate and store a form submission.
  SubmitForm,
}

impl Action {
  pub const ALL: [Self; 1] = [Self::SubmitForm];

  /// The value of the `action` field that selects this operation.
  pub fn name(self) -> &'static str {
    match self {
      Self::SubmitForm => "submit_form",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|a| a.name() == name)
  }
}

// ─── Response envelope ───────────────────────────────────────────────────────

/// `{"success": bool, "data": {"message": "..."}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AjaxResponse {
  pub success: bool,
  pub data:    AjaxData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AjaxData {
  pub message: String,
}

impl AjaxResponse {
  pub fn success(message: impl Into<String>) -> Self {
    Self { success: true, data: AjaxData { message: message.into() } }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self { success: false, data: AjaxData { message: message.into() } }
  }
}

impl IntoResponse for AjaxResponse {
  fn into_response(self) -> Response { Json(self).into_response() }
}
