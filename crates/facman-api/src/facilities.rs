//! Facility listing, lookup, and edit handlers.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use facman_core::{
  facility::{FacilityDraft, FacilityEdit},
  snapshot::EnrichedFacility,
  store::FacilityStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiError, load_enriched};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Optional two-letter type code filter, matched against the code embedded
  /// in each facility code.
  pub code: Option<String>,
}

/// `GET /facilities[?code=XX]` — all enriched facilities, optionally filtered
/// by type code.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<EnrichedFacility>>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut enriched = load_enriched(store.as_ref()).await?;
  if let Some(code) = params.code {
    enriched.retain(|e| e.record.facility.type_code() == Some(code.as_str()));
  }
  Ok(Json(enriched))
}

/// `GET /facilities/{id}` — a single enriched facility.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<EnrichedFacility>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let enriched = load_enriched(store.as_ref()).await?;
  enriched
    .into_iter()
    .find(|e| e.record.facility.id == id)
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("facility {id}")))
}

/// `PUT /facilities/{id}` — apply a partial edit and return the refreshed
/// enriched facility.
///
/// Fields absent from the draft are left untouched. An entirely empty draft
/// is rejected rather than silently doing nothing.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(draft): Json<FacilityDraft>,
) -> Result<Json<EnrichedFacility>, ApiError>
where
  S: FacilityStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if draft.is_empty() {
    return Err(ApiError::BadRequest("empty edit".to_string()));
  }

  let before = load_enriched(store.as_ref()).await?;
  if !before.iter().any(|e| e.record.facility.id == id) {
    return Err(ApiError::NotFound(format!("facility {id}")));
  }

  store
    .save_edit(FacilityEdit { facility_id: id, draft })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(facility_id = %id, "facility edit persisted");

  let after = load_enriched(store.as_ref()).await?;
  after
    .into_iter()
    .find(|e| e.record.facility.id == id)
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("facility {id}")))
}
