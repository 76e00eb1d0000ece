//! Lifespan analysis — age and remaining service life per facility.
//!
//! The analyzer is total: malformed or missing inputs produce `None`, never
//! an error. Input sanity (install dates in the future, deeply expired
//! equipment) is not its concern — only arithmetic correctness.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::facility::Facility;

/// Average Gregorian year in days. The resulting drift of a few hours per
/// year is accepted; no calendar-aware year count is used.
const DAYS_PER_YEAR: f64 = 365.25;

/// Derived aging fields. Computed together: a facility either has a full
/// `Aging` or none at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aging {
  pub age_years:       f64,
  /// Negative once the facility is past expiry.
  pub remaining_years: f64,
  pub expiry_date:     NaiveDate,
}

/// Parse the leading unsigned integer of a lifespan string, e.g. `"15 years"`.
pub fn parse_lifespan_years(raw: &str) -> Option<u32> {
  let trimmed = raw.trim_start();
  let end = trimmed
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(trimmed.len());
  if end == 0 {
    return None;
  }
  trimmed[..end].parse().ok()
}

/// Compute the aging fields for `facility` as of `as_of`.
///
/// Returns `None` when the install date is absent or the lifespan string has
/// no parseable leading integer. The expiry date is the install date advanced
/// by whole calendar years; chrono clamps a Feb 29 anniversary to Feb 28 in
/// non-leap years (pinned by a test below rather than special-cased).
pub fn analyze(facility: &Facility, as_of: NaiveDate) -> Option<Aging> {
  let install = facility.install_date?;
  let years = parse_lifespan_years(facility.lifespan.as_deref()?)?;
  let expiry = install.checked_add_months(Months::new(years.checked_mul(12)?))?;

  let age_years = (as_of - install).num_days() as f64 / DAYS_PER_YEAR;
  let remaining_years = (expiry - as_of).num_days() as f64 / DAYS_PER_YEAR;

  Some(Aging {
    age_years,
    remaining_years,
    expiry_date: expiry,
  })
}

#[cfg(test)]
mod tests {
  use crate::testutil::{date, facility_with_lifespan};

  use super::*;

  #[test]
  fn parse_leading_integer() {
    assert_eq!(parse_lifespan_years("15 years"), Some(15));
    assert_eq!(parse_lifespan_years("10"), Some(10));
    assert_eq!(parse_lifespan_years("  8 years"), Some(8));
    assert_eq!(parse_lifespan_years("years 15"), None);
    assert_eq!(parse_lifespan_years(""), None);
    assert_eq!(parse_lifespan_years("about ten"), None);
  }

  #[test]
  fn expiry_is_install_plus_whole_years() {
    let f = facility_with_lifespan(Some(date(2020, 3, 15)), Some("10 years"));
    let aging = analyze(&f, date(2024, 1, 1)).unwrap();
    assert_eq!(aging.expiry_date, date(2030, 3, 15));
  }

  #[test]
  fn reference_scenario_2015_install_15_years() {
    // install 2015-01-01, lifespan 15 years, as of 2024-01-01:
    // age ~9.0, expiry 2030-01-01, remaining ~6.0.
    let f = facility_with_lifespan(Some(date(2015, 1, 1)), Some("15 years"));
    let aging = analyze(&f, date(2024, 1, 1)).unwrap();
    assert_eq!(aging.expiry_date, date(2030, 1, 1));
    assert!((aging.age_years - 9.0).abs() < 0.01, "age {}", aging.age_years);
    assert!(
      (aging.remaining_years - 6.0).abs() < 0.01,
      "remaining {}",
      aging.remaining_years
    );
  }

  #[test]
  fn remaining_goes_negative_past_expiry() {
    let f = facility_with_lifespan(Some(date(2000, 6, 1)), Some("5 years"));
    let aging = analyze(&f, date(2024, 6, 1)).unwrap();
    assert_eq!(aging.expiry_date, date(2005, 6, 1));
    assert!(aging.remaining_years < 0.0);
    assert!(aging.age_years > 23.0);
  }

  #[test]
  fn future_install_date_is_not_an_error() {
    // Malformed input: installed "in the future". The arithmetic still runs.
    let f = facility_with_lifespan(Some(date(2030, 1, 1)), Some("10 years"));
    let aging = analyze(&f, date(2024, 1, 1)).unwrap();
    assert!(aging.age_years < 0.0);
  }

  #[test]
  fn missing_inputs_disable_the_computation() {
    assert!(analyze(&facility_with_lifespan(None, Some("10 years")), date(2024, 1, 1)).is_none());
    assert!(analyze(&facility_with_lifespan(Some(date(2020, 1, 1)), None), date(2024, 1, 1)).is_none());
    assert!(
      analyze(
        &facility_with_lifespan(Some(date(2020, 1, 1)), Some("unknown")),
        date(2024, 1, 1)
      )
      .is_none()
    );
  }

  #[test]
  fn feb_29_install_clamps_to_feb_28() {
    // Host date library overflow behavior, documented here: chrono's Months
    // addition clamps 2020-02-29 + 1 year to 2021-02-28.
    let f = facility_with_lifespan(Some(date(2020, 2, 29)), Some("1 years"));
    let aging = analyze(&f, date(2020, 3, 1)).unwrap();
    assert_eq!(aging.expiry_date, date(2021, 2, 28));
  }
}
