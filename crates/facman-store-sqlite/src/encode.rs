//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 `YYYY-MM-DD` strings. UUIDs are stored as
//! hyphenated lowercase strings. Booleans ride SQLite's INTEGER affinity.

use chrono::NaiveDate;
use facman_core::facility::{Facility, Inspection};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String {
  id.hyphenated().to_string()
}

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Ok(Uuid::parse_str(s)?)
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

fn decode_opt_date(s: Option<&str>) -> Result<Option<NaiveDate>> {
  s.map(decode_date).transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `facilities` row.
pub struct RawFacility {
  pub id:               String,
  pub facility_code:    String,
  pub equipment_type:   String,
  pub facility_name:    String,
  pub install_location: String,
  pub install_date:     Option<String>,
  pub lifespan:         Option<String>,
  pub manager:          Option<String>,
  pub original_remarks: Option<String>,
  pub legal_inspection: bool,
}

impl RawFacility {
  pub fn into_facility(self) -> Result<Facility> {
    Ok(Facility {
      id:               decode_uuid(&self.id)?,
      facility_code:    self.facility_code,
      equipment_type:   self.equipment_type,
      facility_name:    self.facility_name,
      install_location: self.install_location,
      install_date:     decode_opt_date(self.install_date.as_deref())?,
      lifespan:         self.lifespan,
      manager:          self.manager,
      original_remarks: self.original_remarks,
      legal_inspection: self.legal_inspection,
    })
  }
}

/// Raw strings read directly from an `inspections` row.
pub struct RawInspection {
  pub facility_id:          String,
  pub status:               String,
  pub last_inspection_date: Option<String>,
  pub next_inspection_date: Option<String>,
}

impl RawInspection {
  pub fn into_inspection(self) -> Result<Inspection> {
    Ok(Inspection {
      facility_id:          decode_uuid(&self.facility_id)?,
      status:               self.status,
      last_inspection_date: decode_opt_date(self.last_inspection_date.as_deref())?,
      next_inspection_date: decode_opt_date(self.next_inspection_date.as_deref())?,
    })
  }
}
