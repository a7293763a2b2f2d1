//! Storage module for persisting harvested records
//!
//! This module handles writing records to disk, including:
//! - Deriving the `<category>/<slug>.json` path of each record
//! - Creating intermediate directories on demand
//! - Atomic single-file writes
//! - Slug collision reporting within a run

mod files;
mod traits;

pub use files::JsonFileStore;
pub use traits::{PersistOutcome, RecordStore, StorageError, StorageResult};

use std::path::Path;

/// Opens a JSON file store rooted at `root`
///
/// The directory itself is created lazily by the first write.
pub fn open_store(root: &Path) -> JsonFileStore {
    JsonFileStore::new(root)
}
