//! `facman` — command-line client for the facility maintenance dashboard.
//!
//! # Usage
//!
//! ```
//! facman dashboard --url http://localhost:8750
//! facman list AH
//! facman browse --config ~/.config/facman/config.toml
//! ```

mod app;
mod client;
mod render;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "facman", about = "Facility maintenance dashboard client")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the facman server (default: http://localhost:8750).
  #[arg(long, env = "FACMAN_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
  /// Per-type and global status tallies plus legal bucket counts.
  Dashboard,
  /// Legal inspection report for flagged facilities.
  Legal,
  /// Expiry ranking and average age per equipment type.
  Analysis,
  /// List facilities, optionally filtered by a two-letter type code.
  List {
    code: Option<String>,
  },
  /// Interactive screen-by-screen browsing.
  Browse,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8750".to_string()),
  };

  let client = ApiClient::new(api_config)?;

  match args.command {
    CliCommand::Dashboard => {
      let report = client.dashboard().await?;
      render::dashboard(&report);
    }
    CliCommand::Legal => {
      let report = client.legal().await?;
      render::legal(&report);
    }
    CliCommand::Analysis => {
      let report = client.analysis().await?;
      render::analysis(&report);
    }
    CliCommand::List { code } => {
      let code = code.map(|c| c.to_uppercase());
      let list = client.facilities(code.as_deref()).await?;
      render::facilities(&list);
    }
    CliCommand::Browse => {
      App::new(client).run().await?;
    }
  }

  Ok(())
}
