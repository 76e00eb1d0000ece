//! facman API server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the dashboard API over HTTP.
//!
//! # Seeding
//!
//! To load facilities and inspections from a JSON file before serving:
//!
//! ```
//! cargo run -p facman-api --bin facman-server -- --seed fixtures/demo.json
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use facman_api::ServerConfig;
use facman_core::facility::{Facility, Inspection};
use facman_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Facility maintenance dashboard server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load facilities and inspections from a JSON file before serving.
  #[arg(long)]
  seed: Option<PathBuf>,
}

/// Shape of the `--seed` JSON file.
#[derive(Deserialize)]
struct SeedFile {
  facilities:  Vec<Facility>,
  #[serde(default)]
  inspections: Vec<Inspection>,
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("FACMAN"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if let Some(seed_path) = &cli.seed {
    seed(&store, seed_path).await?;
  }

  let app = facman_api::api_router(Arc::new(store))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Insert the contents of a seed file into the store.
async fn seed(store: &SqliteStore, path: &Path) -> anyhow::Result<()> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read seed file {path:?}"))?;
  let file: SeedFile =
    serde_json::from_str(&raw).context("failed to parse seed file")?;

  let (n_facilities, n_inspections) =
    (file.facilities.len(), file.inspections.len());

  for facility in file.facilities {
    store
      .insert_facility(&facility)
      .await
      .with_context(|| format!("failed to seed facility {}", facility.id))?;
  }
  for inspection in file.inspections {
    store.insert_inspection(&inspection).await.with_context(|| {
      format!("failed to seed inspection for {}", inspection.facility_id)
    })?;
  }

  tracing::info!(
    facilities = n_facilities,
    inspections = n_inspections,
    "seed data loaded"
  );
  Ok(())
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
