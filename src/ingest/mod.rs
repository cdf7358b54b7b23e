//! Snapshot ingestion module
//!
//! Loads the periodic CSV snapshot exports into a [`MemoryStore`]. Each
//! export file is one capture of the whole dataset; the snapshot instant
//! comes from the filename, not from any column.
//!
//! [`MemoryStore`]: crate::store::MemoryStore

mod loader;

pub use loader::{load_store, snapshot_instant_from_filename, SnapshotLoader};

use std::path::PathBuf;
use thiserror::Error;

/// Ingestion errors. Row-level problems never surface here; they are
/// skipped and counted in [`IngestStats`].
#[derive(Debug, Error)]
pub enum IngestError {
    /// Snapshot directory missing or unreadable
    #[error("failed to read snapshot directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// CSV-level failure inside one export file
    #[error("failed to read snapshot file {path}: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
}

/// Counters for one ingest batch
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestStats {
    pub files_loaded: u64,
    pub files_skipped: u64,
    pub observations_loaded: u64,
    pub seats_loaded: u64,
    pub rows_skipped: u64,
}
