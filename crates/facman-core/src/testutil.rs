//! Shared fixture builders for the crate's unit tests.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  facility::{Facility, Inspection},
  snapshot::FacilityRecord,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn facility(facility_code: &str, equipment_type: &str) -> Facility {
  Facility {
    id: Uuid::new_v4(),
    facility_code: facility_code.to_string(),
    equipment_type: equipment_type.to_string(),
    facility_name: format!("{facility_code} unit"),
    install_location: "B1 machine room".to_string(),
    install_date: None,
    lifespan: None,
    manager: None,
    original_remarks: None,
    legal_inspection: false,
  }
}

pub fn facility_with_lifespan(
  install_date: Option<NaiveDate>,
  lifespan: Option<&str>,
) -> Facility {
  let mut f = facility("BG01AH01", "AH");
  f.install_date = install_date;
  f.lifespan = lifespan.map(str::to_string);
  f
}

pub fn inspection(facility_id: Uuid, status: &str) -> Inspection {
  Inspection {
    facility_id,
    status: status.to_string(),
    last_inspection_date: None,
    next_inspection_date: None,
  }
}

/// A facility record with the given inspection status (`None` = no row).
pub fn record(facility_code: &str, equipment_type: &str, status: Option<&str>) -> FacilityRecord {
  let f = facility(facility_code, equipment_type);
  let inspection = status.map(|s| inspection(f.id, s));
  FacilityRecord { facility: f, inspection }
}

/// A legally-flagged facility whose inspection is next due on `next`.
pub fn legal_record(next: NaiveDate) -> FacilityRecord {
  let mut r = record("BG01SF01", "SF", Some("normal"));
  r.facility.legal_inspection = true;
  if let Some(i) = r.inspection.as_mut() {
    i.next_inspection_date = Some(next);
  }
  r
}
