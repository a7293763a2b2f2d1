//! Storage traits and error types
//!
//! This module defines the trait interface for record stores and associated
//! error types.

use crate::model::Record;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error writing {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error for record {id}: {source}")]
    Serialization {
        id: String,
        source: serde_json::Error,
    },

    #[error("Record {id} has an unusable {field}: {value:?}")]
    InvalidKey {
        id: String,
        field: &'static str,
        value: String,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// What happened when a record was persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Path the record was written to
    pub path: PathBuf,

    /// Id of a different record written to the same path earlier in this run
    pub replaced_id: Option<String>,
}

impl PersistOutcome {
    /// Returns true if this write overwrote a different record from this run
    pub fn is_collision(&self) -> bool {
        self.replaced_id.is_some()
    }
}

/// Trait for record store implementations
///
/// Every fetched record is persisted unconditionally; a store never refuses a
/// write because the record was seen before.
pub trait RecordStore {
    /// Writes one record, overwriting any previous file for the same key
    ///
    /// # Errors
    ///
    /// Any failure is fatal for the run: the record's key is not a single path
    /// component, it cannot be serialized, or the filesystem rejects the write.
    fn persist(&mut self, record: &Record) -> StorageResult<PersistOutcome>;
}
