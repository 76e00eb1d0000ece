//! Error type for `facman-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// Attempted to save an edit against an id with no facility row.
  #[error("facility not found: {0}")]
  FacilityNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
