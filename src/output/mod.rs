//! Output module for reporting on a harvested record tree
//!
//! This module handles:
//! - Walking the persisted `<category>/<slug>.json` tree
//! - Counting products, endpoints and response examples
//! - Printing the counts as a single JSON object

pub mod stats;

pub use stats::{
    collect_statistics, print_statistics, render_statistics, CatalogStatistics, StatsError,
};
