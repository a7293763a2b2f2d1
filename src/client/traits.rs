//! Client traits
//!
//! The harvest loop only depends on these traits, so it can be driven by the
//! real GraphQL client or by an in-memory catalog in tests.

use crate::model::{Filters, Grouping, Page};
use async_trait::async_trait;

/// Parameters of one paged products query
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    /// Filters restricting the query, typically one grouping
    pub filters: &'a Filters,

    /// Continuation cursor from the previous page, absent for the first page
    pub cursor: Option<&'a str>,

    /// Number of records requested
    pub page_size: u32,
}

/// Issues one paged query against the remote catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches one page of records
    ///
    /// A non-success response status is not an error: implementations log it
    /// and return [`Page::empty`], which ends the grouping as if it were
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request could not be sent or its body could not be read
    /// - The response envelope is missing the expected fields
    async fn fetch_page(&self, request: PageRequest<'_>) -> crate::Result<Page>;
}

/// Lists the groupings a run iterates over
#[async_trait]
pub trait GroupingSource: Send + Sync {
    /// Returns every grouping in the order the service reports them
    async fn list_groupings(&self) -> crate::Result<Vec<Grouping>>;
}
