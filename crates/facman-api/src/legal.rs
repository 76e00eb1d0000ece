//! Legal inspection report handler.

use std::sync::Arc;

use axum::{Json, extract::State};
use facman_core::{aggregate, aggregate::LegalReport, store::FacilityStore};

use crate::{ApiError, load_enriched};

/// `GET /legal` — bucket tally and per-facility assessments for facilities
/// flagged as legally inspected.
pub async fn report<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<LegalReport>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let enriched = load_enriched(store.as_ref()).await?;
  Ok(Json(aggregate::legal_report(&enriched)))
}
