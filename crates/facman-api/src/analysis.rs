//! Lifespan analysis report handler.

use std::sync::Arc;

use axum::{Json, extract::State};
use facman_core::{aggregate, aggregate::AnalysisReport, store::FacilityStore};

use crate::{ApiError, load_enriched};

/// `GET /analysis` — facilities expiring within the horizon (soonest first)
/// and mean age per equipment type (oldest first).
pub async fn report<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<AnalysisReport>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let enriched = load_enriched(store.as_ref()).await?;
  Ok(Json(aggregate::analysis_report(&enriched)))
}
