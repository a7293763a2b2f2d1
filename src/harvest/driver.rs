//! Pagination driver
//!
//! Pages through one grouping until a short page signals exhaustion,
//! persisting each page's records as soon as it arrives.

use crate::client::{CatalogClient, PageRequest};
use crate::model::Grouping;
use crate::storage::RecordStore;
use std::collections::HashSet;

/// Why a grouping's pagination loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page was shorter than the requested page size
    Exhausted,

    /// The configured page limit was reached first
    PageLimit,
}

/// Result of harvesting one grouping
#[derive(Debug, Clone)]
pub struct GroupingOutcome {
    /// Grouping name
    pub grouping: String,

    /// Distinct record ids fetched for this grouping
    pub ids: HashSet<String>,

    /// Number of page requests issued
    pub pages: u32,

    /// Number of records written, duplicates included
    pub records_persisted: usize,

    /// Writes that replaced a different record on the same path
    pub collisions: usize,

    /// Total reported by the service on the last page
    pub total: u64,

    pub stop: StopReason,
}

impl GroupingOutcome {
    fn new(grouping: &str) -> Self {
        Self {
            grouping: grouping.to_string(),
            ids: HashSet::new(),
            pages: 0,
            records_persisted: 0,
            collisions: 0,
            total: 0,
            stop: StopReason::Exhausted,
        }
    }
}

/// Drives the paged products query for one grouping at a time
///
/// States per grouping: fetch a page, persist its records, add their ids to
/// the grouping's working set, advance the cursor, and stop once a page comes
/// back shorter than `page_size`. The cursor's presence is never checked, so a
/// short page that still carries a cursor ends the grouping, and a full page
/// without one restarts from the beginning. Only `max_pages` bounds that case.
pub struct PaginationDriver<'a, C: ?Sized> {
    client: &'a C,
    page_size: u32,
    max_pages: Option<u32>,
}

impl<'a, C> PaginationDriver<'a, C>
where
    C: CatalogClient + ?Sized,
{
    pub fn new(client: &'a C, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            max_pages: None,
        }
    }

    /// Stops each grouping after `max_pages` pages; `None` leaves it unbounded
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Harvests every page of one grouping into `store`
    ///
    /// # Errors
    ///
    /// Malformed responses, transport failures and storage failures end the
    /// grouping and propagate. A non-success status is absorbed by the client
    /// as an empty page and ends the grouping normally.
    pub async fn harvest<S>(
        &self,
        grouping: &Grouping,
        store: &mut S,
    ) -> crate::Result<GroupingOutcome>
    where
        S: RecordStore + ?Sized,
    {
        let filters = grouping.filters();
        let mut cursor: Option<String> = None;
        let mut outcome = GroupingOutcome::new(&grouping.name);

        loop {
            let page = self
                .client
                .fetch_page(PageRequest {
                    filters: &filters,
                    cursor: cursor.as_deref(),
                    page_size: self.page_size,
                })
                .await?;
            outcome.pages += 1;
            outcome.total = page.total;

            for record in &page.records {
                let persisted = store.persist(record)?;
                if persisted.is_collision() {
                    outcome.collisions += 1;
                }
                outcome.records_persisted += 1;
                outcome.ids.insert(record.id.clone());
            }

            tracing::info!(
                "Fetched {} products in {} of {} total ({})",
                outcome.ids.len(),
                grouping.name,
                page.total,
                page.records.first().map_or("none", |r| r.id.as_str())
            );

            let exhausted = page.is_final(self.page_size);
            cursor = page.next_cursor;

            if exhausted {
                outcome.stop = StopReason::Exhausted;
                break;
            }

            if self.max_pages.is_some_and(|max| outcome.pages >= max) {
                tracing::warn!(
                    "Stopping {} after {} pages (page limit reached, cursor {:?})",
                    grouping.name,
                    outcome.pages,
                    cursor
                );
                outcome.stop = StopReason::PageLimit;
                break;
            }
        }

        Ok(outcome)
    }
}
