//! Server configuration: an optional TOML file overlaid with `FORMBOX_*`
//! environment variables.

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Prefix of the environment variables that override file settings,
/// e.g. `FORMBOX_PORT=9090`.
pub const ENV_PREFIX: &str = "FORMBOX";

/// Runtime server configuration.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub base_url:           String,
  pub store_path:         PathBuf,
  pub auth_username:      String,
  pub auth_password_hash: String,
  #[serde(default = "default_admin_page_size")]
  pub admin_page_size:    usize,
  /// Page slug → page content (HTML with markers).
  #[serde(default = "default_pages")]
  pub pages:              BTreeMap<String, String>,
}

fn default_admin_page_size() -> usize { 20 }

pub(crate) fn default_pages() -> BTreeMap<String, String> {
  BTreeMap::from([
    ("contact".to_owned(), "[custom_form]\n".to_owned()),
    ("entries".to_owned(), "[form_entries]\n".to_owned()),
  ])
}

impl ServerConfig {
  /// Load `path` (if it exists) and the process environment.
  ///
  /// A leading `~/` in `store_path` is resolved against `$HOME`.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    Self::load_from(path, Environment::with_prefix(ENV_PREFIX), home.as_deref())
  }

  fn load_from(
    path: &Path,
    env: Environment,
    home: Option<&Path>,
  ) -> Result<Self, ConfigError> {
    let mut server: Self = Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("base_url", "http://127.0.0.1:8080")?
      .set_default("store_path", "formbox.sqlite3")?
      .add_source(File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()?;

    server.store_path = expand_home(&server.store_path, home);
    Ok(server)
  }
}

/// Replace a leading `~/` with `home`. Other paths are returned unchanged.
fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
  match (path.strip_prefix("~"), home) {
    (Ok(rest), Some(home)) => home.join(rest),
    _ => path.to_path_buf(),
  }
}
