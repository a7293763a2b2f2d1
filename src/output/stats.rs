//! Statistics over a persisted record tree
//!
//! Walks the output directory and tallies products, endpoints, endpoints that
//! carry response examples, and the examples themselves.

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur while walking the record tree
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Failed to walk record tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Malformed record {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// Aggregate counts over a record tree
///
/// Serializes with its keys in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStatistics {
    /// Record files found
    pub products: u64,

    /// Endpoints across all records with version data
    pub endpoints: u64,

    /// Endpoints with a non-empty response example list
    pub endpoints_with_examples: u64,

    /// Response examples across all endpoints
    pub endpoint_examples: u64,
}

impl CatalogStatistics {
    /// Adds the counts contributed by one parsed record
    fn add_record(&mut self, path: &Path, record: &Value) -> Result<(), StatsError> {
        self.products += 1;

        let version = match record.get("version") {
            Some(version) if has_content(version) => version,
            _ => return Ok(()),
        };

        let endpoints = version
            .get("endpoints")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed(path, "version has no endpoints list"))?;

        for endpoint in endpoints {
            let examples = endpoint
                .get("responsePayloads")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed(path, "endpoint has no responsePayloads list"))?;

            self.endpoints += 1;
            if !examples.is_empty() {
                self.endpoints_with_examples += 1;
            }
            self.endpoint_examples += examples.len() as u64;
        }

        Ok(())
    }
}

/// Returns false for the empty-ish values that mean "no version data"
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn malformed(path: &Path, message: &str) -> StatsError {
    StatsError::Malformed {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Walks `root` recursively and tallies every `*.json` record
///
/// # Returns
///
/// * `Ok(CatalogStatistics)` - Counts over every record file
/// * `Err(StatsError)` - The tree could not be walked, or a record is not
///   valid JSON or has version data without the expected lists
pub fn collect_statistics(root: &Path) -> Result<CatalogStatistics, StatsError> {
    let mut stats = CatalogStatistics::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_record_file(entry.path()) {
            continue;
        }

        let path = entry.path();
        let content = std::fs::read_to_string(path).map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let record: Value = serde_json::from_str(&content).map_err(|source| StatsError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        stats.add_record(path, &record)?;
    }

    tracing::debug!("Counted {} records under {}", stats.products, root.display());
    Ok(stats)
}

fn is_record_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Renders statistics as an indented JSON object
pub fn render_statistics(stats: &CatalogStatistics) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(stats)
}

/// Prints statistics to stdout as a single JSON object
pub fn print_statistics(stats: &CatalogStatistics) -> Result<(), serde_json::Error> {
    println!("{}", render_statistics(stats)?);
    Ok(())
}
