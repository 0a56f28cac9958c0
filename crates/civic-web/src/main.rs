//! civic server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus `CIVIC_*`
//! environment variables, opens the configured inquiry store, and serves the
//! web pages and JSON API over HTTP.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for `auth_password_hash`:
//!
//! ```
//! cargo run -p civic-web --bin civic -- --hash-password
//! ```
//!
//! # Legacy import
//!
//! ```
//! cargo run -p civic-web --bin civic -- --import export.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use civic_core::{import::parse_export, store::InquiryStore};
use civic_web::{AppState, ServerConfig, auth::hash_password, store::Backend};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Civic inquiry desk server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load a legacy JSON export into the configured store and exit.
  #[arg(long, value_name = "FILE")]
  import: Option<PathBuf>,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let hash = hash_password(&read_password()?).map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
    println!("{hash}");
    return Ok(());
  }

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CIVIC"))
    .build()
    .context("failed to read configuration")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  server_cfg.store_path = expand_tilde(&server_cfg.store_path);

  let store = Backend::from_config(&server_cfg)
    .await
    .context("failed to open inquiry store")?;

  if let Some(path) = cli.import {
    return import(&store, &path).await;
  }

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  if server_cfg.auth_username.is_empty() || server_cfg.auth_password_hash.is_empty() {
    tracing::warn!("auth_username/auth_password_hash not set; internal pages are unprotected");
  }

  let state = AppState::new(store, server_cfg).context("failed to build application state")?;
  let app = civic_web::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Insert every email of a legacy export. Rows that fail are logged and
/// skipped.
async fn import(store: &Backend, path: &Path) -> anyhow::Result<()> {
  let json = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read {}", path.display()))?;
  let rows = parse_export(&json).context("failed to parse export")?;

  let total = rows.len();
  let mut imported = 0usize;
  for (row, parsed) in rows.into_iter().enumerate() {
    let form = match parsed {
      Ok(form) => form,
      Err(e) => {
        tracing::warn!(row, error = %e, "skipping malformed export row");
        continue;
      }
    };
    match store.insert(form.into_new_inquiry(Utc::now())).await {
      Ok(_) => imported += 1,
      Err(e) => tracing::error!(row, error = %e, "failed to import inquiry"),
    }
  }

  tracing::info!(imported, total, path = %path.display(), "import finished");
  Ok(())
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
