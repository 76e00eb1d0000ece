//! [`SqliteStore`] — the SQLite implementation of [`FacilityStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use facman_core::{
  facility::{Facility, FacilityEdit, Inspection},
  store::FacilityStore,
};

use crate::{
  encode::{RawFacility, RawInspection, encode_date, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A facility store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a facility row. Used by seeding and tests; the dashboard itself
  /// never creates facilities.
  pub async fn insert_facility(&self, facility: &Facility) -> Result<()> {
    let id_str            = encode_uuid(facility.id);
    let facility_code     = facility.facility_code.clone();
    let equipment_type    = facility.equipment_type.clone();
    let facility_name     = facility.facility_name.clone();
    let install_location  = facility.install_location.clone();
    let install_date_str  = facility.install_date.map(encode_date);
    let lifespan          = facility.lifespan.clone();
    let manager           = facility.manager.clone();
    let original_remarks  = facility.original_remarks.clone();
    let legal_inspection  = facility.legal_inspection;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO facilities (
             id, facility_code, equipment_type, facility_name,
             install_location, install_date, lifespan,
             manager, original_remarks, legal_inspection
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            facility_code,
            equipment_type,
            facility_name,
            install_location,
            install_date_str,
            lifespan,
            manager,
            original_remarks,
            legal_inspection,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert an inspection row. At most one per facility; a second insert for
  /// the same facility violates the UNIQUE constraint.
  pub async fn insert_inspection(&self, inspection: &Inspection) -> Result<()> {
    let facility_id_str = encode_uuid(inspection.facility_id);
    let status          = inspection.status.clone();
    let last_str        = inspection.last_inspection_date.map(encode_date);
    let next_str        = inspection.next_inspection_date.map(encode_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO inspections (
             facility_id, status, last_inspection_date, next_inspection_date
           ) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![facility_id_str, status, last_str, next_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn facility_exists(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM facilities WHERE id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }
}

// ─── FacilityStore impl ──────────────────────────────────────────────────────

impl FacilityStore for SqliteStore {
  type Error = Error;

  async fn list_facilities(&self) -> Result<Vec<Facility>> {
    let raws: Vec<RawFacility> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, facility_code, equipment_type, facility_name,
                  install_location, install_date, lifespan,
                  manager, original_remarks, legal_inspection
           FROM facilities",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawFacility {
              id:               row.get(0)?,
              facility_code:    row.get(1)?,
              equipment_type:   row.get(2)?,
              facility_name:    row.get(3)?,
              install_location: row.get(4)?,
              install_date:     row.get(5)?,
              lifespan:         row.get(6)?,
              manager:          row.get(7)?,
              original_remarks: row.get(8)?,
              legal_inspection: row.get(9)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFacility::into_facility).collect()
  }

  async fn list_inspections(&self) -> Result<Vec<Inspection>> {
    let raws: Vec<RawInspection> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT facility_id, status, last_inspection_date, next_inspection_date
           FROM inspections",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawInspection {
              facility_id:          row.get(0)?,
              status:               row.get(1)?,
              last_inspection_date: row.get(2)?,
              next_inspection_date: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawInspection::into_inspection).collect()
  }

  async fn save_edit(&self, edit: FacilityEdit) -> Result<()> {
    if !self.facility_exists(edit.facility_id).await? {
      return Err(Error::FacilityNotFound(edit.facility_id));
    }

    let id_str           = encode_uuid(edit.facility_id);
    let draft            = edit.draft;
    let touches_inspection = draft.touches_inspection();

    let facility_name    = draft.facility_name;
    let install_location = draft.install_location;
    let manager          = draft.manager;
    let original_remarks = draft.original_remarks;
    let last_str         = draft.last_inspection_date.map(encode_date);
    let next_str         = draft.next_inspection_date.map(encode_date);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // `None` draft fields leave the stored value untouched.
        tx.execute(
          "UPDATE facilities SET
             facility_name    = COALESCE(?2, facility_name),
             install_location = COALESCE(?3, install_location),
             manager          = COALESCE(?4, manager),
             original_remarks = COALESCE(?5, original_remarks)
           WHERE id = ?1",
          rusqlite::params![
            id_str,
            facility_name,
            install_location,
            manager,
            original_remarks,
          ],
        )?;

        if touches_inspection {
          // A facility may not have an inspection row yet. A row created by
          // an edit carries an empty status, which the tallies count in the
          // total but in no bucket.
          tx.execute(
            "INSERT INTO inspections (
               facility_id, status, last_inspection_date, next_inspection_date
             ) VALUES (?1, '', ?2, ?3)
             ON CONFLICT(facility_id) DO UPDATE SET
               last_inspection_date = COALESCE(excluded.last_inspection_date, last_inspection_date),
               next_inspection_date = COALESCE(excluded.next_inspection_date, next_inspection_date)",
            rusqlite::params![id_str, last_str, next_str],
          )?;
        }

        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}
