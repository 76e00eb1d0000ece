//! Snapshot assembly — joining the two raw collections into per-facility
//! records and enriching them with derived fields.
//!
//! A snapshot is replaced wholesale on each load, never patched in place.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  facility::{Facility, Inspection, InspectionStatus},
  legal::{self, LegalAssessment},
  lifespan::{self, Aging},
};

// ─── Joined record ───────────────────────────────────────────────────────────

/// A facility joined with its (at most one) inspection row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityRecord {
  pub facility:   Facility,
  pub inspection: Option<Inspection>,
}

impl FacilityRecord {
  /// The recognised inspection status, if the facility has an inspection row
  /// and its status is one of the three tallied values.
  pub fn status(&self) -> Option<InspectionStatus> {
    self
      .inspection
      .as_ref()
      .and_then(|i| InspectionStatus::recognize(&i.status))
  }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// The full in-memory record set for one load.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  pub records: Vec<FacilityRecord>,
}

impl Snapshot {
  /// Join the two collections on facility id.
  ///
  /// The inspection index is built once, so the join is linear in the input
  /// size. When the input carries duplicate inspections for one facility the
  /// first row wins.
  pub fn join(facilities: Vec<Facility>, inspections: Vec<Inspection>) -> Self {
    let mut by_facility: HashMap<Uuid, Inspection> =
      HashMap::with_capacity(inspections.len());
    for inspection in inspections {
      by_facility.entry(inspection.facility_id).or_insert(inspection);
    }

    let records = facilities
      .into_iter()
      .map(|facility| {
        let inspection = by_facility.remove(&facility.id);
        FacilityRecord { facility, inspection }
      })
      .collect();

    Self { records }
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn get(&self, id: Uuid) -> Option<&FacilityRecord> {
    self.records.iter().find(|r| r.facility.id == id)
  }
}

// ─── Enrichment ──────────────────────────────────────────────────────────────

/// A facility record with its derived fields, computed against a fixed date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedFacility {
  pub record: FacilityRecord,
  /// Absent when the install date or lifespan is missing or unparseable.
  pub aging:  Option<Aging>,
  pub legal:  LegalAssessment,
}

impl EnrichedFacility {
  pub fn remaining_years(&self) -> Option<f64> {
    self.aging.as_ref().map(|a| a.remaining_years)
  }
}

/// Enrich every record in `snapshot` against `today`. Pure: the snapshot is
/// untouched and the outputs are freshly computed values.
pub fn enrich(snapshot: &Snapshot, today: NaiveDate) -> Vec<EnrichedFacility> {
  snapshot
    .records
    .iter()
    .map(|record| EnrichedFacility {
      aging:  lifespan::analyze(&record.facility, today),
      legal:  legal::resolve(record, today),
      record: record.clone(),
    })
    .collect()
}
