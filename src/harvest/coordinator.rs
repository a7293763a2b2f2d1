//! Harvest coordinator - main run orchestration
//!
//! This module contains the run loop that:
//! - Enumerates groupings and applies the starting offset
//! - Drives pagination for each grouping in order
//! - Merges each grouping's ids into the run's deduplication ledger
//! - Reports per-grouping and run-wide counts

use crate::client::{CatalogClient, GroupingSource};
use crate::config::HarvestConfig;
use crate::harvest::driver::{GroupingOutcome, PaginationDriver, StopReason};
use crate::harvest::ledger::DedupLedger;
use crate::model::Grouping;
use crate::storage::RecordStore;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Groupings harvested
    pub groupings: usize,

    /// Page requests issued across all groupings
    pub pages: u64,

    /// Records written, including re-fetches of the same record
    pub records_persisted: u64,

    /// Distinct record ids across all groupings
    pub unique_records: usize,

    /// Writes that replaced a different record on the same path
    pub slug_collisions: u64,

    /// Groupings stopped by the page limit rather than exhaustion
    pub page_limited: usize,
}

/// Main harvest coordinator
///
/// Owns the catalog client, the record store and the run's ledger. Everything
/// runs on one logical thread: each page is awaited, persisted and counted
/// before the next request goes out.
pub struct Harvester<C, S> {
    catalog: C,
    store: S,
    ledger: DedupLedger,
    page_size: u32,
    offset: usize,
    max_pages: Option<u32>,
}

impl<C, S> Harvester<C, S>
where
    C: CatalogClient + GroupingSource,
    S: RecordStore,
{
    /// Creates a new coordinator from the harvest settings
    pub fn new(catalog: C, store: S, config: &HarvestConfig) -> Self {
        Self {
            catalog,
            store,
            ledger: DedupLedger::new(),
            page_size: config.page_size,
            offset: config.offset,
            max_pages: config.max_pages_per_grouping,
        }
    }

    /// Runs a complete harvest
    ///
    /// 1. Lists the groupings and skips the first `offset`
    /// 2. Pages through each remaining grouping, persisting every record
    /// 3. Merges each grouping's ids into the ledger and logs the counts
    pub async fn run(&mut self) -> crate::Result<RunSummary> {
        let groupings = self.catalog.list_groupings().await?;
        let listed = groupings.len();
        let selected: Vec<Grouping> = groupings.into_iter().skip(self.offset).collect();

        tracing::info!(
            "Harvesting {} of {} groupings (offset {})",
            selected.len(),
            listed,
            self.offset
        );

        self.harvest_groupings(&selected).await
    }

    /// Harvests the given groupings in order
    pub async fn harvest_groupings(&mut self, groupings: &[Grouping]) -> crate::Result<RunSummary> {
        let mut summary = RunSummary::default();
        let driver =
            PaginationDriver::new(&self.catalog, self.page_size).with_max_pages(self.max_pages);

        for (index, grouping) in groupings.iter().enumerate() {
            tracing::info!(
                "Grouping {}/{}: {}",
                index + 1,
                groupings.len(),
                grouping.name
            );

            let outcome = driver.harvest(grouping, &mut self.store).await?;
            record_outcome(&mut self.ledger, &mut summary, outcome);
        }

        summary.unique_records = self.ledger.len();
        Ok(summary)
    }

    /// The run's deduplication ledger
    pub fn ledger(&self) -> &DedupLedger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

/// Folds one grouping's outcome into the ledger and the run summary
fn record_outcome(ledger: &mut DedupLedger, summary: &mut RunSummary, outcome: GroupingOutcome) {
    let grouping_unique = outcome.ids.len();
    let newly_unique = ledger.merge(outcome.ids);

    tracing::info!(
        "Fetched {} ({} unique, {} total) products for group: {}",
        grouping_unique,
        newly_unique,
        ledger.len(),
        outcome.grouping
    );

    summary.groupings += 1;
    summary.pages += u64::from(outcome.pages);
    summary.records_persisted += outcome.records_persisted as u64;
    summary.slug_collisions += outcome.collisions as u64;
    if outcome.stop == StopReason::PageLimit {
        summary.page_limited += 1;
    }
}
