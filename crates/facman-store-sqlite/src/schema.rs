//! SQL schema for the facman SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS facilities (
    id               TEXT PRIMARY KEY,
    facility_code    TEXT NOT NULL,   -- chars 4..6 carry the equipment code
    equipment_type   TEXT NOT NULL,   -- two-letter code; catalog lookup may miss
    facility_name    TEXT NOT NULL,
    install_location TEXT NOT NULL,
    install_date     TEXT,            -- ISO 8601 date or NULL
    lifespan         TEXT,            -- e.g. '15 years'; leading integer is read
    manager          TEXT,
    original_remarks TEXT,
    legal_inspection INTEGER NOT NULL DEFAULT 0
);

-- At most one inspection row per facility (1-to-0-or-1).
CREATE TABLE IF NOT EXISTS inspections (
    facility_id          TEXT NOT NULL REFERENCES facilities(id),
    status               TEXT NOT NULL,  -- free-form; 'normal'|'warning'|'danger' recognised
    last_inspection_date TEXT,
    next_inspection_date TEXT,
    UNIQUE (facility_id)
);

CREATE INDEX IF NOT EXISTS facilities_code_idx ON facilities(facility_code);

PRAGMA user_version = 1;
";
