//! Configuration module for Catalog Harvester
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every setting has a default, so a missing file is the
//! same as an empty one.
//!
//! # Example
//!
//! ```no_run
//! use catalog_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Page size: {}", config.harvest.page_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, Credentials, HarvestConfig, RemoteConfig, SortDirection};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
