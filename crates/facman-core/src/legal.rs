//! Legal-inspection deadline resolution.
//!
//! A pure six-branch decision, not a persistent state machine: no facility
//! retains a status between evaluations, and the bucket is always recomputed
//! against the caller-supplied "today".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::snapshot::FacilityRecord;

/// Deadline bucket for a legally-flagged facility.
///
/// `NotApplicable` is a fixed sentinel for unflagged facilities; it is never
/// counted into the five legal-tally buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalStatus {
  NotApplicable,
  NoDate,
  Overdue,
  Urgent,
  Warning,
  Normal,
}

impl LegalStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::NotApplicable => "not_applicable",
      Self::NoDate => "no_date",
      Self::Overdue => "overdue",
      Self::Urgent => "urgent",
      Self::Warning => "warning",
      Self::Normal => "normal",
    }
  }
}

/// Resolver output: the bucket plus a human-readable countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAssessment {
  pub status:  LegalStatus,
  pub message: String,
}

/// Resolve the deadline bucket for `record` against `today`.
///
/// Branches are evaluated in order; the first match wins. `today` is already
/// date-granular (`NaiveDate` carries no time of day), so bucket boundaries
/// fall exactly on calendar days.
pub fn resolve(record: &FacilityRecord, today: NaiveDate) -> LegalAssessment {
  if !record.facility.legal_inspection {
    return LegalAssessment {
      status:  LegalStatus::NotApplicable,
      message: "N/A".into(),
    };
  }

  let Some(next) = record
    .inspection
    .as_ref()
    .and_then(|i| i.next_inspection_date)
  else {
    return LegalAssessment {
      status:  LegalStatus::NoDate,
      message: "schedule not set".into(),
    };
  };

  let days_left = (next - today).num_days();
  let (status, message) = if days_left < 0 {
    (LegalStatus::Overdue, format!("{} days overdue", days_left.abs()))
  } else if days_left <= 7 {
    (LegalStatus::Urgent, format!("{days_left} days remaining"))
  } else if days_left <= 30 {
    (LegalStatus::Warning, format!("{days_left} days remaining"))
  } else {
    (LegalStatus::Normal, format!("{days_left} days remaining"))
  };

  LegalAssessment { status, message }
}

#[cfg(test)]
mod tests {
  use crate::testutil::{date, legal_record, record};

  use super::*;

  const TODAY: (i32, u32, u32) = (2024, 6, 1);

  fn today() -> NaiveDate {
    date(TODAY.0, TODAY.1, TODAY.2)
  }

  #[test]
  fn unflagged_facility_is_not_applicable() {
    let r = record("BG01AH01", "AH", Some("normal"));
    let a = resolve(&r, today());
    assert_eq!(a.status, LegalStatus::NotApplicable);
    assert_eq!(a.message, "N/A");
  }

  #[test]
  fn flagged_without_next_date_is_no_date() {
    // No inspection row at all.
    let mut r = record("BG01SF01", "SF", None);
    r.facility.legal_inspection = true;
    let a = resolve(&r, today());
    assert_eq!(a.status, LegalStatus::NoDate);
    assert_eq!(a.message, "schedule not set");

    // Inspection row with no next date.
    let mut r = record("BG01SF01", "SF", Some("normal"));
    r.facility.legal_inspection = true;
    let a = resolve(&r, today());
    assert_eq!(a.status, LegalStatus::NoDate);
  }

  #[test]
  fn bucket_boundaries() {
    // days_left → expected bucket, exactly per the transition table.
    let cases = [
      (-1_i64, LegalStatus::Overdue),
      (0, LegalStatus::Urgent),
      (7, LegalStatus::Urgent),
      (8, LegalStatus::Warning),
      (30, LegalStatus::Warning),
      (31, LegalStatus::Normal),
      (365, LegalStatus::Normal),
    ];
    for (days, expected) in cases {
      let next = today() + chrono::Duration::days(days);
      let r = legal_record(next);
      let a = resolve(&r, today());
      assert_eq!(a.status, expected, "days_left = {days}");
    }
  }

  #[test]
  fn overdue_message_counts_days_past() {
    let r = legal_record(today() - chrono::Duration::days(1));
    let a = resolve(&r, today());
    assert_eq!(a.message, "1 days overdue");

    let r = legal_record(today() - chrono::Duration::days(14));
    assert_eq!(resolve(&r, today()).message, "14 days overdue");
  }

  #[test]
  fn remaining_message_counts_days_left() {
    let r = legal_record(today() + chrono::Duration::days(5));
    assert_eq!(resolve(&r, today()).message, "5 days remaining");
  }
}
