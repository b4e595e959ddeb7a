//! The submission pipeline: presence check → sanitise → validate → persist.

use std::collections::HashMap;

use crate::{
  entry::{Entry, NewEntry},
  error::{Field, SubmissionError},
  sanitize::{sanitize_email, sanitize_text_field, sanitize_textarea_field},
  store::EntryStore,
};

/// Raw, untrusted field values as they arrived in a request.
///
/// `None` means the key was absent; an empty string means it was sent empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
  pub name:    Option<String>,
  pub email:   Option<String>,
  pub message: Option<String>,
}

impl Submission {
  /// Pick the three form fields out of a decoded request body. Other keys
  /// (e.g. `action`) are ignored.
  pub fn from_fields(fields: &HashMap<String, String>) -> Self {
    let take = |field: Field| fields.get(field.key()).cloned();
    Self {
      name:    take(Field::Name),
      email:   take(Field::Email),
      message: take(Field::Message),
    }
  }

  /// Sanitise every field and check the entry invariants.
  ///
  /// Absent keys are reported before any value is inspected.
  pub fn validate(&self) -> Result<NewEntry, SubmissionError> {
    let (Some(name), Some(email), Some(message)) =
      (&self.name, &self.email, &self.message)
    else {
      let missing = Field::ALL
        .into_iter()
        .find(|field| self.get(*field).is_none())
        .unwrap_or(Field::Name);
      return Err(SubmissionError::MissingField(missing));
    };

    NewEntry::new(
      sanitize_text_field(name),
      sanitize_email(email),
      sanitize_textarea_field(message),
    )
  }

  fn get(&self, field: Field) -> Option<&str> {
    match field {
      Field::Name => self.name.as_deref(),
      Field::Email => self.email.as_deref(),
      Field::Message => self.message.as_deref(),
    }
  }
}

/// Validate `submission` and persist it as exactly one new entry.
///
/// Nothing is written unless validation succeeds.
pub async fn submit<S: EntryStore>(
  store: &S,
  submission: &Submission,
) -> Result<Entry, SubmissionError> {
  let new_entry = submission.validate()?;
  store
    .create_entry(new_entry)
    .await
    .map_err(|e| SubmissionError::Persistence(Box::new(e)))
}
