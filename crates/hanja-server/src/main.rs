//! hanja-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, seeds the character catalog on first run, and serves the
//! JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::{Json, Router, routing::get};
use clap::Parser;
use hanja_store_sqlite::{SqliteStore, ensure_seed};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Hanja study API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Initialise the store (schema + seed data) and exit without serving.
  #[arg(long)]
  init_db: bool,
}

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `HANJA_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:       String,
  #[serde(default = "default_port")]
  port:       u16,
  #[serde(default = "default_store_path")]
  store_path: PathBuf,
  /// Named storage partition; unset means the store's default.
  partition:  Option<String>,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("hanja.db") }

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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("HANJA"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the store. A partition failure aborts here with the store's
  // operator guidance attached.
  let store = SqliteStore::open(
    &server_cfg.store_path,
    server_cfg.partition.as_deref(),
  )
  .await
  .with_context(|| {
    format!("failed to open store at {:?}", server_cfg.store_path)
  })?;

  let inserted = ensure_seed(&store)
    .await
    .context("failed to seed character catalog")?;
  if inserted > 0 {
    tracing::info!(inserted, "seeded empty character catalog");
  } else {
    tracing::debug!("character catalog already populated");
  }

  if cli.init_db {
    tracing::info!("store initialised, exiting");
    return Ok(());
  }

  let app = Router::new()
    .route("/", get(root))
    .nest("/api", hanja_api::api_router(Arc::new(store)))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// `GET /` — liveness greeting.
async fn root() -> Json<serde_json::Value> {
  Json(serde_json::json!({ "message": "한자 5급 API 서버입니다." }))
}
