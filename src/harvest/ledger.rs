//! Run-wide deduplication ledger

use std::collections::HashSet;

/// Set of record ids observed across every grouping of one run
///
/// Purely observational: it feeds the uniqueness counts in the logs and the
/// run summary and never suppresses a write. It lives for one run and is not
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct DedupLedger {
    seen: HashSet<String>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an id, returning true if it had not been seen before
    pub fn observe(&mut self, id: &str) -> bool {
        if self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.to_string())
    }

    /// Merges a grouping's working set, returning how many ids were new
    pub fn merge<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .filter(|id| self.observe(id.as_ref()))
            .count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Number of distinct ids observed so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
