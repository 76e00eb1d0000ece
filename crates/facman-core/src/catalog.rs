//! Equipment catalog — the fixed mapping from two-letter codes to display
//! names.
//!
//! Colour and style tokens stay in the presentation layer; only the display
//! name crosses into the computation core.

/// Catalog order is dashboard display order.
pub const CATALOG: &[(&str, &str)] = &[
  ("AH", "Air handling"),
  ("BO", "Heat source"),
  ("SF", "Fire suppression"),
  ("PP", "Pumps"),
  ("FA", "Supply & exhaust fans"),
  ("WA", "Tanks"),
  ("SW", "Pool & water treatment"),
  ("EL", "Electrical"),
  ("EV", "Elevators"),
  ("EC", "Controls"),
  ("BC", "Broadcast"),
  ("DZ", "Disaster response"),
  ("IT", "IT & network"),
  ("AT", "Building fabric"),
];

/// Display name for `code`. Total over all inputs: unknown codes return
/// `None` and callers fall back to the raw code as the label.
pub fn lookup(code: &str) -> Option<&'static str> {
  CATALOG
    .iter()
    .find(|(c, _)| *c == code)
    .map(|(_, name)| *name)
}

/// The display label for `code`: the catalog name, or the raw code itself
/// when unmapped.
pub fn label<'a>(code: &'a str) -> &'a str {
  lookup(code).unwrap_or(code)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lookup_known_code() {
    assert_eq!(lookup("AH"), Some("Air handling"));
    assert_eq!(lookup("EV"), Some("Elevators"));
  }

  #[test]
  fn lookup_unknown_code_is_none_not_a_failure() {
    assert_eq!(lookup("ZZ"), None);
    assert_eq!(lookup(""), None);
    assert_eq!(lookup("ah"), None);
  }

  #[test]
  fn label_falls_back_to_raw_code() {
    assert_eq!(label("PP"), "Pumps");
    assert_eq!(label("ZZ"), "ZZ");
  }

  #[test]
  fn codes_are_unique() {
    for (i, (code, _)) in CATALOG.iter().enumerate() {
      assert!(
        !CATALOG[i + 1..].iter().any(|(c, _)| c == code),
        "duplicate catalog code {code}"
      );
    }
  }
}
