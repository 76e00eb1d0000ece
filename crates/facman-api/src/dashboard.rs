//! Dashboard summary handler.

use std::sync::Arc;

use axum::{Json, extract::State};
use facman_core::{aggregate, aggregate::Dashboard, store::FacilityStore};

use crate::{ApiError, load_enriched};

/// `GET /dashboard` — per-type and global status tallies plus the legal
/// inspection tally, computed from a fresh snapshot.
pub async fn summary<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let enriched = load_enriched(store.as_ref()).await?;
  Ok(Json(aggregate::dashboard(&enriched)))
}
