//! `POST /ajax`: action dispatch for asynchronous requests.
//!
//! Open to anonymous and authenticated callers alike. A missing or unknown
//! `action`, or a body that is not form-encoded, is answered with `400` and
//! body `0`.

use std::collections::HashMap;

use axum::{
  Form,
  extract::{State, rejection::FormRejection},
  response::{IntoResponse, Response},
};
use formbox_core::{
  SubmissionError,
  store::EntryStore,
  submission::{Submission, submit},
};

use crate::{
  AppState,
  action::{Action, AjaxResponse},
  error::Error,
};

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully.";

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Response, Error>
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  let Form(fields) = form.map_err(|rejection| {
    tracing::debug!(%rejection, "ajax request without a form body");
    Error::BadRequest
  })?;

  let action = fields
    .get("action")
    .and_then(|name| Action::from_name(name))
    .ok_or(Error::BadRequest)?;

  match action {
    Action::SubmitForm => Ok(submit_form(&state, &fields).await.into_response()),
  }
}

/// Validate the posted fields and store one entry.
pub async fn submit_form<S>(
  state: &AppState<S>,
  fields: &HashMap<String, String>,
) -> AjaxResponse
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  let submission = Submission::from_fields(fields);

  match submit(state.store.as_ref(), &submission).await {
    Ok(entry) => {
      tracing::info!(entry_id = %entry.entry_id, "form entry created");
      AjaxResponse::success(SUCCESS_MESSAGE)
    }
    Err(e @ SubmissionError::Persistence(_)) => {
      tracing::error!(error = %e, "failed to store form entry");
      AjaxResponse::error(e.public_message())
    }
    Err(e) => {
      tracing::warn!(error = %e, "form submission rejected");
      AjaxResponse::error(e.public_message())
    }
  }
}
