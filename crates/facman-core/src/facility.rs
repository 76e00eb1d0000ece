//! Facility and inspection records — the two raw collections the store
//! returns.
//!
//! Records are immutable snapshots: nothing in the computation layer mutates
//! them. The only write path in the system is [`FacilityEdit`], which is
//! applied by the store, after which a fresh snapshot is loaded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Facility ────────────────────────────────────────────────────────────────

/// Byte range of `facility_code` that carries the two-letter equipment code.
const TYPE_CODE_RANGE: std::ops::Range<usize> = 4..6;

/// A physical piece of building equipment. Identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
  pub id:               Uuid,
  /// Site-assigned asset code; characters 4..6 encode the equipment type.
  pub facility_code:    String,
  /// Two-letter classification code; may be missing from the catalog.
  pub equipment_type:   String,
  pub facility_name:    String,
  pub install_location: String,
  pub install_date:     Option<NaiveDate>,
  /// Declared service life, e.g. `"15 years"`. Only the leading integer is
  /// ever read; anything else disables lifespan computation.
  pub lifespan:         Option<String>,
  pub manager:          Option<String>,
  pub original_remarks: Option<String>,
  /// Subject to the mandatory-inspection workflow.
  #[serde(default)]
  pub legal_inspection: bool,
}

impl Facility {
  /// The two-letter equipment code embedded in `facility_code`, if the code
  /// is long enough to carry one.
  pub fn type_code(&self) -> Option<&str> {
    self.facility_code.get(TYPE_CODE_RANGE)
  }
}

// ─── Inspection ──────────────────────────────────────────────────────────────

/// The most recent and next-scheduled maintenance check for a facility.
/// At most one per facility; identity is `facility_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
  pub facility_id:          Uuid,
  /// Free-form in practice; only the three [`InspectionStatus`] values are
  /// recognised by the tallies.
  pub status:               String,
  pub last_inspection_date: Option<NaiveDate>,
  pub next_inspection_date: Option<NaiveDate>,
}

/// The three status values the tallies recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
  Normal,
  Warning,
  Danger,
}

impl InspectionStatus {
  /// `None` for anything outside the three recognised values. Such facilities
  /// count toward tally totals but toward no status bucket, so in general
  /// `total != normal + warning + danger`.
  pub fn recognize(raw: &str) -> Option<Self> {
    match raw {
      "normal" => Some(Self::Normal),
      "warning" => Some(Self::Warning),
      "danger" => Some(Self::Danger),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Normal => "normal",
      Self::Warning => "warning",
      Self::Danger => "danger",
    }
  }
}

// ─── Edits ───────────────────────────────────────────────────────────────────

/// Optional field overrides captured by the edit form. `None` means
/// "leave as stored".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityDraft {
  pub facility_name:        Option<String>,
  pub install_location:     Option<String>,
  pub manager:              Option<String>,
  pub original_remarks:     Option<String>,
  pub last_inspection_date: Option<NaiveDate>,
  pub next_inspection_date: Option<NaiveDate>,
}

impl FacilityDraft {
  /// True when the draft would change nothing.
  pub fn is_empty(&self) -> bool {
    self.facility_name.is_none()
      && self.install_location.is_none()
      && self.manager.is_none()
      && self.original_remarks.is_none()
      && self.last_inspection_date.is_none()
      && self.next_inspection_date.is_none()
  }

  /// True when the draft touches the inspection row rather than the facility.
  pub fn touches_inspection(&self) -> bool {
    self.last_inspection_date.is_some() || self.next_inspection_date.is_some()
  }
}

/// Input to [`crate::store::FacilityStore::save_edit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityEdit {
  pub facility_id: Uuid,
  pub draft:       FacilityDraft,
}
