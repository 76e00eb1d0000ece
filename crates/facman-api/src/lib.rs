//! JSON REST API for the facman dashboard.
//!
//! Exposes an axum [`Router`] backed by any
//! [`facman_core::store::FacilityStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! Every read handler loads a complete snapshot from the store and recomputes
//! the enrichment and aggregates from it — nothing is cached between
//! requests, matching the load-then-derive lifecycle of the core.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", facman_api::api_router(store.clone()))
//! ```

pub mod analysis;
pub mod dashboard;
pub mod error;
pub mod facilities;
pub mod legal;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use chrono::Utc;
use facman_core::{
  snapshot::{self, EnrichedFacility, Snapshot},
  store::FacilityStore,
};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FACMAN_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8750
}

fn default_store_path() -> PathBuf {
  PathBuf::from("facman.db")
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FacilityStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/facilities", get(facilities::list::<S>))
    .route(
      "/facilities/{id}",
      get(facilities::get_one::<S>).put(facilities::update_one::<S>),
    )
    .route("/dashboard", get(dashboard::summary::<S>))
    .route("/legal", get(legal::report::<S>))
    .route("/analysis", get(analysis::report::<S>))
    .with_state(store)
}

// ─── Snapshot loading ────────────────────────────────────────────────────────

/// Load a complete snapshot from `store` and enrich it against today's date.
///
/// The two reads are issued concurrently and joined; if either fails the
/// whole load fails, so handlers never observe a partial snapshot.
pub(crate) async fn load_enriched<S>(store: &S) -> Result<Vec<EnrichedFacility>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (facilities, inspections) =
    tokio::try_join!(store.list_facilities(), store.list_inspections())
      .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::debug!(
    facilities = facilities.len(),
    inspections = inspections.len(),
    "snapshot loaded"
  );

  let snapshot = Snapshot::join(facilities, inspections);
  Ok(snapshot::enrich(&snapshot, Utc::now().date_naive()))
}
