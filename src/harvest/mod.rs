//! Harvest module: the paginated fetch-and-deduplicate pipeline
//!
//! This module contains the core harvesting logic, including:
//! - The per-grouping pagination driver
//! - The run-wide deduplication ledger
//! - Overall run coordination across groupings

mod coordinator;
mod driver;
#[cfg(test)]
pub(crate) mod fake;
mod ledger;

pub use coordinator::{Harvester, RunSummary};
pub use driver::{GroupingOutcome, PaginationDriver, StopReason};
pub use ledger::DedupLedger;

use crate::client::{GraphqlCatalog, QueryOrdering};
use crate::config::{Config, Credentials};
use crate::storage::open_store;
use crate::HarvestError;

/// Runs a complete harvest against the configured remote catalog
///
/// This is the main entry point for a harvest. It will:
/// 1. Build the HTTP client with the session credentials
/// 2. Open the record store at the output directory
/// 3. Enumerate groupings and page through each one
///
/// # Example
///
/// ```no_run
/// use catalog_harvester::config::{Config, Credentials};
/// use catalog_harvester::harvest::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("csrf-token", "session=abc");
/// let summary = run_harvest(&Config::default(), &credentials).await?;
/// println!("{} unique products", summary.unique_records);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(
    config: &Config,
    credentials: &Credentials,
) -> Result<RunSummary, HarvestError> {
    let ordering = QueryOrdering::from_config(&config.harvest);
    let catalog = GraphqlCatalog::connect(&config.remote, credentials, ordering)?;
    let store = open_store(&config.harvest.output_dir);

    tracing::info!(
        "Harvesting {} into {} ({} records per page)",
        catalog.endpoint(),
        config.harvest.output_dir.display(),
        config.harvest.page_size
    );

    let mut harvester = Harvester::new(catalog, store, &config.harvest);
    harvester.run().await
}
