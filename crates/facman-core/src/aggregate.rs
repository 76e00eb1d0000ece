//! Dashboard aggregates — independent folds over the enriched record set.
//!
//! Every fold is total and re-derivable at any time from the current
//! snapshot; two runs over the same snapshot yield identical structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  catalog::{self, CATALOG},
  facility::InspectionStatus,
  legal::LegalStatus,
  snapshot::EnrichedFacility,
};

/// Facilities closer to expiry than this many years make the ranking.
const EXPIRY_HORIZON_YEARS: f64 = 3.0;

// ─── Status tallies ──────────────────────────────────────────────────────────

/// Three-way status count plus the overall total. `total` can exceed the
/// bucket sum: facilities with no inspection row or an unrecognised status
/// count the total only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
  pub total:   usize,
  pub normal:  usize,
  pub warning: usize,
  pub danger:  usize,
}

impl StatusTally {
  fn add(&mut self, status: Option<InspectionStatus>) {
    self.total += 1;
    match status {
      Some(InspectionStatus::Normal) => self.normal += 1,
      Some(InspectionStatus::Warning) => self.warning += 1,
      Some(InspectionStatus::Danger) => self.danger += 1,
      None => {}
    }
  }
}

/// Status tally for one equipment code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTally {
  pub code:  String,
  /// Catalog display name, or the raw code when unmapped.
  pub name:  String,
  pub tally: StatusTally,
}

/// Per-type status tallies, keyed off the `facility_code` substring.
///
/// Catalog codes come first in catalog order (including zero-total entries;
/// hiding those is the presentation layer's call). Codes present in the data
/// but missing from the catalog follow in sorted order, labelled by the raw
/// code. Facilities whose `facility_code` is too short to carry a type code
/// appear in no per-type row.
pub fn per_type_tally(records: &[EnrichedFacility]) -> Vec<TypeTally> {
  let mut by_code: BTreeMap<&str, StatusTally> = BTreeMap::new();
  for e in records {
    let Some(code) = e.record.facility.type_code() else {
      continue;
    };
    by_code.entry(code).or_default().add(e.record.status());
  }

  let mut out: Vec<TypeTally> = CATALOG
    .iter()
    .map(|(code, name)| TypeTally {
      code:  (*code).to_string(),
      name:  (*name).to_string(),
      tally: by_code.remove(*code).unwrap_or_default(),
    })
    .collect();

  out.extend(by_code.into_iter().map(|(code, tally)| TypeTally {
    code: code.to_string(),
    name: code.to_string(),
    tally,
  }));

  out
}

/// The same three-way count across the whole collection, type-independent.
pub fn global_tally(records: &[EnrichedFacility]) -> StatusTally {
  let mut tally = StatusTally::default();
  for e in records {
    tally.add(e.record.status());
  }
  tally
}

// ─── Legal tally ─────────────────────────────────────────────────────────────

/// Count of legally-flagged facilities by resolver bucket. The five buckets
/// sum exactly to `total`; each flagged facility lands in exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalTally {
  pub total:   usize,
  pub overdue: usize,
  pub urgent:  usize,
  pub warning: usize,
  pub normal:  usize,
  pub no_date: usize,
}

pub fn legal_tally(records: &[EnrichedFacility]) -> LegalTally {
  let mut tally = LegalTally::default();
  for e in records {
    let bucket = match e.legal.status {
      LegalStatus::NotApplicable => continue,
      LegalStatus::Overdue => &mut tally.overdue,
      LegalStatus::Urgent => &mut tally.urgent,
      LegalStatus::Warning => &mut tally.warning,
      LegalStatus::Normal => &mut tally.normal,
      LegalStatus::NoDate => &mut tally.no_date,
    };
    *bucket += 1;
    tally.total += 1;
  }
  tally
}

// ─── Expiring-soon ranking ───────────────────────────────────────────────────

/// Facilities with a defined remaining lifespan under three years, sorted
/// ascending by remaining years. The sort is stable, so ties keep their
/// original relative order. The top-5 chart projection is a prefix of this.
pub fn expiring_soon(records: &[EnrichedFacility]) -> Vec<EnrichedFacility> {
  let mut soon: Vec<EnrichedFacility> = records
    .iter()
    .filter(|e| {
      e.remaining_years()
        .is_some_and(|r| r < EXPIRY_HORIZON_YEARS)
    })
    .cloned()
    .collect();

  soon.sort_by(|a, b| {
    let ra = a.remaining_years().unwrap_or(f64::INFINITY);
    let rb = b.remaining_years().unwrap_or(f64::INFINITY);
    ra.total_cmp(&rb)
  });

  soon
}

// ─── Average age per type ────────────────────────────────────────────────────

/// Mean age for one equipment-type display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAverageAge {
  /// Catalog display name of `equipment_type`, or the raw code when unmapped.
  pub label:          String,
  pub mean_age_years: f64,
  pub count:          usize,
}

/// Arithmetic mean age per equipment type, descending by mean. Facilities
/// without aging fields are excluded entirely. Grouping goes through a
/// BTreeMap so equal means keep label order and the output is deterministic.
pub fn average_age_by_type(records: &[EnrichedFacility]) -> Vec<TypeAverageAge> {
  let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
  for e in records {
    let Some(aging) = &e.aging else {
      continue;
    };
    let label = catalog::label(&e.record.facility.equipment_type);
    let entry = groups.entry(label).or_insert((0.0, 0));
    entry.0 += aging.age_years;
    entry.1 += 1;
  }

  let mut out: Vec<TypeAverageAge> = groups
    .into_iter()
    .map(|(label, (sum, count))| TypeAverageAge {
      label: label.to_string(),
      mean_age_years: sum / count as f64,
      count,
    })
    .collect();

  out.sort_by(|a, b| b.mean_age_years.total_cmp(&a.mean_age_years));
  out
}

// ─── Assembled reports ───────────────────────────────────────────────────────

/// Everything the dashboard screen reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
  pub per_type: Vec<TypeTally>,
  pub global:   StatusTally,
  pub legal:    LegalTally,
}

pub fn dashboard(records: &[EnrichedFacility]) -> Dashboard {
  Dashboard {
    per_type: per_type_tally(records),
    global:   global_tally(records),
    legal:    legal_tally(records),
  }
}

/// The legal-inspection screen: the tally plus every flagged facility with
/// its assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalReport {
  pub tally:      LegalTally,
  pub facilities: Vec<EnrichedFacility>,
}

pub fn legal_report(records: &[EnrichedFacility]) -> LegalReport {
  LegalReport {
    tally:      legal_tally(records),
    facilities: records
      .iter()
      .filter(|e| e.record.facility.legal_inspection)
      .cloned()
      .collect(),
  }
}

/// The analysis screen: expiry ranking and per-type mean ages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
  pub expiring_soon:       Vec<EnrichedFacility>,
  pub average_age_by_type: Vec<TypeAverageAge>,
}

pub fn analysis_report(records: &[EnrichedFacility]) -> AnalysisReport {
  AnalysisReport {
    expiring_soon:       expiring_soon(records),
    average_age_by_type: average_age_by_type(records),
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use crate::{
    snapshot::{self, Snapshot},
    testutil::{date, facility, inspection, legal_record},
  };

  use super::*;

  fn today() -> NaiveDate {
    date(2024, 6, 1)
  }

  /// Two AH facilities (one normal, one uninspected), one PP (danger),
  /// one with an off-catalog code, one with a short facility code.
  fn mixed_records() -> Vec<EnrichedFacility> {
    let ah1 = facility("BG01AH01", "AH");
    let ah2 = facility("BG01AH02", "AH");
    let pp = facility("BG01PP01", "PP");
    let zz = facility("BG01ZZ01", "ZZ");
    let short = facility("BG1", "AH");

    let inspections = vec![
      inspection(ah1.id, "normal"),
      inspection(pp.id, "danger"),
      inspection(zz.id, "mystery"),
    ];
    let snapshot = Snapshot::join(vec![ah1, ah2, pp, zz, short], inspections);
    snapshot::enrich(&snapshot, today())
  }

  #[test]
  fn per_type_counts_uninspected_in_total_only() {
    // The reference scenario: two AH facilities, one "normal", one with no
    // inspection row → total 2, normal 1, warning 0, danger 0.
    let records = mixed_records();
    let tallies = per_type_tally(&records);

    let ah = tallies.iter().find(|t| t.code == "AH").unwrap();
    assert_eq!(ah.tally, StatusTally { total: 2, normal: 1, warning: 0, danger: 0 });
    assert_eq!(ah.name, "Air handling");
  }

  #[test]
  fn per_type_keeps_catalog_order_and_appends_unmapped_codes() {
    let records = mixed_records();
    let tallies = per_type_tally(&records);

    // all 14 catalog codes, then the data-only ZZ
    assert_eq!(tallies.len(), CATALOG.len() + 1);
    for (t, (code, _)) in tallies.iter().zip(CATALOG.iter()) {
      assert_eq!(t.code, *code);
    }

    let zz = tallies.last().unwrap();
    assert_eq!(zz.code, "ZZ");
    assert_eq!(zz.name, "ZZ", "unmapped code labels itself");
    // unrecognised status counts the total only
    assert_eq!(zz.tally, StatusTally { total: 1, normal: 0, warning: 0, danger: 0 });
  }

  #[test]
  fn global_tally_spans_all_records() {
    let records = mixed_records();
    let g = global_tally(&records);
    assert_eq!(g.total, 5);
    assert_eq!(g.normal, 1);
    assert_eq!(g.warning, 0);
    assert_eq!(g.danger, 1);
    // total != normal + warning + danger here, and that is expected
    assert!(g.total > g.normal + g.warning + g.danger);
  }

  #[test]
  fn legal_buckets_sum_to_total() {
    let records_raw = vec![
      legal_record(today() - chrono::Duration::days(3)), // overdue
      legal_record(today() + chrono::Duration::days(2)), // urgent
      legal_record(today() + chrono::Duration::days(20)), // warning
      legal_record(today() + chrono::Duration::days(90)), // normal
    ];
    let mut no_date = legal_record(today());
    no_date.inspection = None;
    let mut unflagged = legal_record(today());
    unflagged.facility.legal_inspection = false;

    let snapshot = Snapshot {
      records: records_raw
        .into_iter()
        .chain([no_date, unflagged])
        .collect(),
    };
    let enriched = snapshot::enrich(&snapshot, today());
    let tally = legal_tally(&enriched);

    assert_eq!(tally.total, 5, "unflagged facility is not counted");
    assert_eq!(
      tally.overdue + tally.urgent + tally.warning + tally.normal + tally.no_date,
      tally.total
    );
    assert_eq!(tally.overdue, 1);
    assert_eq!(tally.urgent, 1);
    assert_eq!(tally.warning, 1);
    assert_eq!(tally.normal, 1);
    assert_eq!(tally.no_date, 1);
  }

  fn aging_facility(code: &str, eq: &str, install: NaiveDate, years: &str) -> crate::facility::Facility {
    let mut f = facility(code, eq);
    f.install_date = Some(install);
    f.lifespan = Some(years.to_string());
    f
  }

  #[test]
  fn expiring_soon_filters_and_sorts_ascending() {
    let near = aging_facility("BG01AH01", "AH", date(2010, 1, 1), "15 years"); // ~0.6y left
    let nearer = aging_facility("BG01PP01", "PP", date(2005, 1, 1), "19 years"); // expired
    let far = aging_facility("BG01EL01", "EL", date(2020, 1, 1), "30 years");
    let unknown = facility("BG01EV01", "EV"); // no aging fields

    let snapshot = Snapshot::join(vec![near, nearer, far, unknown], vec![]);
    let enriched = snapshot::enrich(&snapshot, today());
    let ranking = expiring_soon(&enriched);

    assert_eq!(ranking.len(), 2, "only facilities under the 3-year horizon");
    let remaining: Vec<f64> = ranking
      .iter()
      .filter_map(|e| e.remaining_years())
      .collect();
    assert_eq!(remaining.len(), 2);
    assert!(remaining[0] <= remaining[1], "ascending order");
    assert!(remaining[0] < 0.0, "already-expired facility ranks first");
    assert!(ranking.iter().all(|e| e.remaining_years().unwrap() < 3.0));
  }

  #[test]
  fn expiring_soon_ties_keep_original_order() {
    let a = aging_facility("BG01AH01", "AH", date(2010, 1, 1), "15 years");
    let b = aging_facility("BG01AH02", "AH", date(2010, 1, 1), "15 years");
    let (id_a, id_b) = (a.id, b.id);

    let snapshot = Snapshot::join(vec![a, b], vec![]);
    let enriched = snapshot::enrich(&snapshot, today());
    let ranking = expiring_soon(&enriched);

    assert_eq!(ranking[0].record.facility.id, id_a);
    assert_eq!(ranking[1].record.facility.id, id_b);
  }

  #[test]
  fn average_age_groups_by_display_name_and_sorts_desc() {
    let old_ah = aging_facility("BG01AH01", "AH", date(2004, 6, 1), "30 years"); // age 20
    let young_ah = aging_facility("BG01AH02", "AH", date(2014, 6, 1), "30 years"); // age 10
    let pp = aging_facility("BG01PP01", "PP", date(2019, 6, 1), "30 years"); // age 5
    let zz = aging_facility("BG01ZZ01", "ZZ", date(2021, 6, 1), "30 years"); // age 3
    let no_aging = facility("BG01EL01", "EL");

    let snapshot = Snapshot::join(vec![old_ah, young_ah, pp, zz, no_aging], vec![]);
    let enriched = snapshot::enrich(&snapshot, today());
    let averages = average_age_by_type(&enriched);

    assert_eq!(averages.len(), 3, "facility without aging joins no group");

    assert_eq!(averages[0].label, "Air handling");
    assert_eq!(averages[0].count, 2);
    assert!((averages[0].mean_age_years - 15.0).abs() < 0.05);

    assert_eq!(averages[1].label, "Pumps");
    assert_eq!(averages[2].label, "ZZ", "unmapped type labelled by raw code");

    assert!(
      averages.windows(2).all(|w| w[0].mean_age_years >= w[1].mean_age_years),
      "descending by mean age"
    );
  }

  #[test]
  fn aggregation_is_idempotent() {
    let records = mixed_records();

    let first = dashboard(&records);
    let second = dashboard(&records);
    assert_eq!(first.per_type, second.per_type);
    assert_eq!(first.global, second.global);
    assert_eq!(first.legal, second.legal);

    let a1 = analysis_report(&records);
    let a2 = analysis_report(&records);
    assert_eq!(a1.average_age_by_type, a2.average_age_by_type);
    assert_eq!(
      a1.expiring_soon.len(),
      a2.expiring_soon.len()
    );
  }
}
