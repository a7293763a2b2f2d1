use crate::model::Record;

/// One page of a products query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Records in the order the service returned them
    pub records: Vec<Record>,

    /// Opaque continuation cursor for the next page
    pub next_cursor: Option<String>,

    /// Server-reported total for the current filter
    pub total: u64,
}

impl Page {
    /// An empty page with no cursor and a zero total
    ///
    /// Stands in for a page the service refused to serve.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if this page ends its grouping
    ///
    /// A page shorter than the requested size is the only exhaustion signal;
    /// the cursor is deliberately not consulted.
    pub fn is_final(&self, page_size: u32) -> bool {
        self.records.len() < page_size as usize
    }
}
