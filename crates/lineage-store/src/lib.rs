//! Lineage Store - Snapshot persistence
//!
//! This crate serializes a [`lineage_core::Lineage`] to the JSON snapshot
//! format and loads it back best-effort, reporting skipped rows.

pub mod error;
pub mod snapshot;

pub use error::{StoreError, StoreResult};
pub use snapshot::{load, save, Headers, LoadReport, Snapshot};
