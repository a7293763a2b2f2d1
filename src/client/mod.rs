//! Remote catalog client
//!
//! This module contains everything that talks to the GraphQL catalog service:
//! - Query documents and request body construction
//! - The client traits the harvest loop is written against
//! - The reqwest-backed implementation with credential headers

mod fetcher;
mod queries;
mod traits;

pub use fetcher::{build_http_client, GraphqlCatalog};
pub use queries::{
    categories_request, products_request, QueryOrdering, CATEGORIES_OPERATION, CATEGORIES_QUERY,
    PRODUCTS_OPERATION, PRODUCTS_QUERY,
};
pub use traits::{CatalogClient, GroupingSource, PageRequest};
