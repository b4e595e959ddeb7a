//! `formbox`: serves the configured form pages, the `/ajax` submission
//! endpoint, and the admin entry list from one SQLite file.
//!
//! Settings come from `formbox.toml` (see `formbox.example.toml`) and
//! `FORMBOX_*` environment variables. The admin password is stored as an
//! argon2 hash; print one with:
//!
//! ```text
//! echo 'my password' | formbox --hash-password
//! ```

use std::{io::BufRead, path::PathBuf};

use anyhow::{Context as _, anyhow};
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use formbox_store_sqlite::SqliteStore;
use formbox_web::{
  AppState, ServerConfig,
  markers::{self, Marker},
};
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Form intake server")]
struct Cli {
  /// TOML settings file; skipped if it does not exist.
  #[arg(short, long, default_value = "formbox.toml")]
  config: PathBuf,

  /// Read the admin password from stdin, print its argon2 hash, and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  if cli.hash_password {
    println!("{}", hash_admin_password()?);
    return Ok(());
  }

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let settings = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load settings from {:?}", cli.config))?;

  for (slug, content) in &settings.pages {
    if !Marker::ALL.into_iter().any(|marker| markers::contains(content, marker)) {
      tracing::debug!(%slug, "page has no markers; served as written");
    }
  }

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open entry store {:?}", settings.store_path))?;

  let address = format!("{}:{}", settings.host, settings.port);
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  tracing::info!(
    %address,
    base_url = %settings.base_url,
    pages = ?settings.pages.keys().collect::<Vec<_>>(),
    "formbox ready"
  );

  let state = AppState::new(store, settings);
  axum::serve(listener, formbox_web::router(state))
    .await
    .context("server stopped unexpectedly")
}

/// Hash the first line of stdin for use as `auth_password_hash`.
fn hash_admin_password() -> anyhow::Result<String> {
  let password = std::io::stdin()
    .lock()
    .lines()
    .next()
    .context("no password on stdin")??;

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| anyhow!("failed to hash password: {e}"))
}
