//! Catalog Harvester: a paginated GraphQL catalog scraper
//!
//! This crate pages through a remote product catalog one category at a time,
//! persists every product as its own JSON file, tracks globally unique product
//! ids across overlapping categories, and computes aggregate statistics over
//! the persisted tree.

pub mod client;
pub mod config;
pub mod harvest;
pub mod model;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Malformed {operation} response: {message}")]
    MalformedResponse { operation: String, message: String },

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use harvest::{DedupLedger, Harvester, RunSummary};
pub use model::{Grouping, Page, Record};
