//! JSON file storage implementation
//!
//! This module provides a directory-tree implementation of the RecordStore
//! trait: one pretty-printed JSON file per record at
//! `<root>/<category>/<slug>.json`.

use crate::model::Record;
use crate::storage::traits::{PersistOutcome, RecordStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory-tree record store
pub struct JsonFileStore {
    root: PathBuf,
    /// Record id last written to each path during this run
    written: HashMap<PathBuf, String>,
}

impl JsonFileStore {
    /// Creates a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: HashMap::new(),
        }
    }

    /// Root directory of the persisted tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path a record is persisted to
    pub fn record_path(&self, record: &Record) -> StorageResult<PathBuf> {
        let label = record.category_label();
        check_component(&record.id, "category", label)?;
        check_component(&record.id, "slugifiedName", &record.slugified_name)?;
        Ok(self.root.join(label).join(record.file_name()))
    }

    /// Number of distinct paths written during this run
    pub fn paths_written(&self) -> usize {
        self.written.len()
    }
}

impl RecordStore for JsonFileStore {
    fn persist(&mut self, record: &Record) -> StorageResult<PersistOutcome> {
        let path = self.record_path(record)?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());

        fs::create_dir_all(&dir).map_err(|source| StorageError::Write {
            path: dir.clone(),
            source,
        })?;

        let json =
            serde_json::to_string_pretty(record).map_err(|source| StorageError::Serialization {
                id: record.id.clone(),
                source,
            })?;

        // Same length as the final name so a slug that fits also fits here
        let tmp = dir.join(format!(".{}.tmp", record.slugified_name));
        if let Err(source) = fs::write(&tmp, json) {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::Write { path: tmp, source });
        }
        if let Err(source) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::Write { path, source });
        }

        let replaced_id = match self.written.insert(path.clone(), record.id.clone()) {
            Some(previous) if previous != record.id => Some(previous),
            _ => None,
        };

        if let Some(previous) = &replaced_id {
            tracing::warn!(
                "Slug collision at {}: record {} replaced {}",
                path.display(),
                record.id,
                previous
            );
        }

        Ok(PersistOutcome { path, replaced_id })
    }
}

/// Rejects keys that are not exactly one path component
fn check_component(id: &str, field: &'static str, value: &str) -> StorageResult<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StorageError::InvalidKey {
            id: id.to_string(),
            field,
            value: value.to_string(),
        });
    }

    Ok(())
}
