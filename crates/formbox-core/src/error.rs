//! Error types for `formbox-core`.

use std::fmt;

use thiserror::Error;

/// One of the three submitted form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Email,
  Message,
}

impl Field {
  pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

  /// The request key the field is posted under.
  pub fn key(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Email => "email",
      Self::Message => "message",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.key()) }
}

/// Why a submission did not produce an entry.
///
/// Every variant is terminal for its request; none leaves partial state.
#[derive(Debug, Error)]
pub enum SubmissionError {
  #[error("missing field: {0}")]
  MissingField(Field),

  #[error("invalid value for field: {0}")]
  Validation(Field),

  #[error("store error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SubmissionError {
  /// The message shown to the submitter.
  pub fn public_message(&self) -> &'static str {
    match self {
      Self::MissingField(_) => "Invalid request.",
      Self::Validation(_) => "Invalid input.",
      Self::Persistence(_) => "Failed to save the form data.",
    }
  }
}
