//! Catalog data model
//!
//! # Components
//!
//! - `Grouping`: a named category used as a query filter and directory segment
//! - `Record`: one catalog product, with its opaque payload passed through untouched
//! - `Page`: one page of records plus pagination metadata

mod grouping;
mod page;
mod record;

pub use grouping::{Filters, Grouping};
pub use page::Page;
pub use record::{Record, UNCATEGORIZED_LABEL};
