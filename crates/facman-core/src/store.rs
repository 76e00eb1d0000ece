//! The `FacilityStore` trait — the data-store collaborator.
//!
//! The trait is implemented by storage backends (e.g. `facman-store-sqlite`).
//! Higher layers (`facman-api`, `facman-cli`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::facility::{Facility, FacilityEdit, Inspection};

/// Abstraction over the relational store holding the two raw collections.
///
/// Reads are whole-snapshot, "select all" style: the store must return the
/// complete collection in one call — the core cannot tell a partial result
/// from a complete one, so no pagination contract exists. Callers issue the
/// two list calls together and treat either failing as a failed load; no
/// partial snapshot is ever installed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FacilityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every facility row, unfiltered.
  fn list_facilities(
    &self,
  ) -> impl Future<Output = Result<Vec<Facility>, Self::Error>> + Send + '_;

  /// Every inspection row, unfiltered.
  fn list_inspections(
    &self,
  ) -> impl Future<Output = Result<Vec<Inspection>, Self::Error>> + Send + '_;

  /// Persist an accepted draft edit: facility columns are updated in place
  /// and the inspection row is upserted for the date fields.
  ///
  /// Returns an error if the facility does not exist.
  fn save_edit(
    &self,
    edit: FacilityEdit,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
