//! Core types and computation for the facman facility dashboard.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.
//!
//! The derived-metrics pipeline: the two raw collections returned by a
//! [`store::FacilityStore`] are joined into a [`snapshot::Snapshot`], enriched
//! per facility ([`lifespan`], [`legal`]), and folded into the dashboard
//! aggregates ([`aggregate`]). Every step is a pure function of the snapshot
//! and a caller-supplied date. Nothing here raises on malformed records —
//! partiality shows up as absent fields or uncounted buckets, never as a
//! fault, which is why this crate carries no error type of its own.

pub mod aggregate;
pub mod catalog;
pub mod facility;
pub mod legal;
pub mod lifespan;
pub mod snapshot;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;
