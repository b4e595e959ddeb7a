//! Basic-auth guard for the admin list view.
//!
//! Formbox has a single admin account, configured as a username plus an
//! argon2 PHC hash. Public routes never look at `Authorization`.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use formbox_core::store::EntryStore;

use crate::{AppState, error::Error};

/// `WWW-Authenticate` value sent with every admin 401.
pub const ADMIN_CHALLENGE: &str = "Basic realm=\"formbox admin\"";

/// The admin account.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

impl AuthConfig {
  /// Whether `credentials` name the admin account with its password.
  ///
  /// An unparseable `password_hash` accepts nobody.
  pub fn accepts(&self, credentials: &Credentials) -> bool {
    if credentials.username != self.username {
      return false;
    }
    PasswordHash::new(&self.password_hash).is_ok_and(|hash| {
      Argon2::default()
        .verify_password(credentials.password.as_bytes(), &hash)
        .is_ok()
    })
  }
}

/// Username and password carried by an `Authorization: Basic` header.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  password:     String,
}

impl Credentials {
  /// Decode the `Authorization` header, if it holds Basic credentials.
  /// The scheme name is matched case-insensitively.
  pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
      return None;
    }

    let decoded = String::from_utf8(B64.decode(encoded.trim()).ok()?).ok()?;
    // The password may itself contain ':'.
    let (username, password) = decoded.split_once(':')?;
    Some(Self { username: username.to_owned(), password: password.to_owned() })
  }
}

/// An admin who presented valid credentials. Taking it as a handler argument
/// puts that handler behind the login prompt.
pub struct AdminUser {
  pub username: String,
}

impl<S> FromRequestParts<AppState<S>> for AdminUser
where
  S: EntryStore + Clone + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let Some(credentials) = Credentials::from_headers(&parts.headers) else {
      // Browsers ask without credentials first; not worth a warning.
      tracing::debug!(path = %parts.uri.path(), "admin view requested without credentials");
      return Err(Error::Unauthorized);
    };

    if !state.auth.accepts(&credentials) {
      tracing::warn!(
        username = %credentials.username,
        path = %parts.uri.path(),
        "admin credentials rejected"
      );
      return Err(Error::Unauthorized);
    }

    Ok(AdminUser { username: credentials.username })
  }
}
