//! Plain-text rendering for reports and facility lists.

use facman_core::{
  aggregate::{AnalysisReport, Dashboard, LegalReport},
  snapshot::EnrichedFacility,
};

/// Dashboard: per-type tallies (non-empty types only), the global tally, and
/// the legal bucket counts.
pub fn dashboard(report: &Dashboard) {
  println!("Facility status by type");
  println!("{:<4} {:<24} {:>5} {:>7} {:>8} {:>7}", "code", "type", "total", "normal", "warning", "danger");
  for t in report.per_type.iter().filter(|t| t.tally.total > 0) {
    println!(
      "{:<4} {:<24} {:>5} {:>7} {:>8} {:>7}",
      t.code, t.name, t.tally.total, t.tally.normal, t.tally.warning, t.tally.danger,
    );
  }

  let g = &report.global;
  println!();
  println!(
    "All facilities: {} total ({} normal, {} warning, {} danger)",
    g.total, g.normal, g.warning, g.danger,
  );

  let l = &report.legal;
  println!(
    "Legal inspections: {} tracked ({} overdue, {} urgent, {} warning, {} normal, {} unscheduled)",
    l.total, l.overdue, l.urgent, l.warning, l.normal, l.no_date,
  );
}

/// One row per facility: code, name, status, legal assessment, remaining life.
pub fn facilities(list: &[EnrichedFacility]) {
  if list.is_empty() {
    println!("(no facilities)");
    return;
  }

  println!(
    "{:<12} {:<28} {:<8} {:<22} {:>9}",
    "code", "name", "status", "legal", "remaining",
  );
  for e in list {
    let f = &e.record.facility;
    let status = e.record.status().map(|s| s.as_str()).unwrap_or("-");
    let remaining = e
      .remaining_years()
      .map(|r| format!("{r:.1} y"))
      .unwrap_or_else(|| "-".to_string());
    println!(
      "{:<12} {:<28} {:<8} {:<22} {:>9}",
      f.facility_code, f.facility_name, status, e.legal.message, remaining,
    );
    println!("  id: {}", f.id);
  }
}

/// Legal report: the bucket tally followed by every flagged facility.
pub fn legal(report: &LegalReport) {
  let t = &report.tally;
  println!(
    "Legal inspections: {} tracked ({} overdue, {} urgent, {} warning, {} normal, {} unscheduled)",
    t.total, t.overdue, t.urgent, t.warning, t.normal, t.no_date,
  );
  println!();
  facilities(&report.facilities);
}

/// Analysis: expiry ranking (soonest first, top five flagged) and mean age
/// per equipment type.
pub fn analysis(report: &AnalysisReport) {
  println!("Expiring within 3 years (soonest first)");
  if report.expiring_soon.is_empty() {
    println!("(none)");
  } else {
    for (i, e) in report.expiring_soon.iter().enumerate() {
      let f = &e.record.facility;
      let remaining = e
        .remaining_years()
        .map(|r| format!("{r:.1} y"))
        .unwrap_or_else(|| "-".to_string());
      let marker = if i < 5 { "*" } else { " " };
      println!(
        "{marker} {:<12} {:<28} {:>9} remaining",
        f.facility_code, f.facility_name, remaining,
      );
    }
  }

  println!();
  println!("Average age by equipment type");
  println!("{:<24} {:>9} {:>6}", "type", "mean age", "count");
  for t in &report.average_age_by_type {
    println!(
      "{:<24} {:>7.1} y {:>6}",
      t.label, t.mean_age_years, t.count,
    );
  }
}
