//! In-memory catalog and store used by the harvest tests

use crate::client::{CatalogClient, GroupingSource, PageRequest};
use crate::model::{Grouping, Page, Record};
use crate::storage::{PersistOutcome, RecordStore, StorageResult};
use crate::HarvestError;
use async_trait::async_trait;
use serde_json::Map;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

/// A scripted response for one products query
pub(crate) enum Scripted {
    Page(Page),
    Malformed,
}

/// Serves scripted pages per grouping and records every request
#[derive(Default)]
pub(crate) struct FakeCatalog {
    groupings: Vec<Grouping>,
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    repeat: HashMap<String, Page>,
    calls: Mutex<Vec<(String, Option<String>, u32)>>,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a grouping whose queries answer with `responses` in order
    pub(crate) fn grouping(mut self, name: &str, responses: Vec<Scripted>) -> Self {
        self.groupings.push(Grouping::named(name));
        self.scripts
            .get_mut()
            .unwrap()
            .insert(name.to_string(), responses.into());
        self
    }

    /// Adds a grouping that answers every query with the same page
    pub(crate) fn endless_grouping(mut self, name: &str, page: Page) -> Self {
        self.groupings.push(Grouping::named(name));
        self.repeat.insert(name.to_string(), page);
        self
    }

    /// Requests seen so far as (grouping, cursor, page size)
    pub(crate) fn calls(&self) -> Vec<(String, Option<String>, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_for(&self, grouping: &str) -> usize {
        self.calls().iter().filter(|(name, _, _)| name == grouping).count()
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn fetch_page(&self, request: PageRequest<'_>) -> crate::Result<Page> {
        let name = request
            .filters
            .get("categoryNames")
            .and_then(|names| names.get(0))
            .and_then(|name| name.as_str())
            .unwrap_or_default()
            .to_string();

        self.calls.lock().unwrap().push((
            name.clone(),
            request.cursor.map(str::to_string),
            request.page_size,
        ));

        if let Some(page) = self.repeat.get(&name) {
            return Ok(page.clone());
        }

        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&name)
            .and_then(|queue| queue.pop_front());

        match next {
            Some(Scripted::Page(page)) => Ok(page),
            Some(Scripted::Malformed) | None => Err(HarvestError::MalformedResponse {
                operation: "GetProducts".to_string(),
                message: format!("no data for {}", name),
            }),
        }
    }
}

#[async_trait]
impl GroupingSource for FakeCatalog {
    async fn list_groupings(&self) -> crate::Result<Vec<Grouping>> {
        Ok(self.groupings.clone())
    }
}

/// Keeps persisted records in memory
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) records: Vec<Record>,
}

impl RecordStore for MemoryStore {
    fn persist(&mut self, record: &Record) -> StorageResult<PersistOutcome> {
        self.records.push(record.clone());
        Ok(PersistOutcome {
            path: PathBuf::from(record.category_label()).join(record.file_name()),
            replaced_id: None,
        })
    }
}

pub(crate) fn record(id: &str, category: Option<&str>) -> Record {
    Record {
        id: id.to_string(),
        category: Some(category.map(str::to_string)),
        slugified_name: format!("slug-{}", id),
        payload: Map::new(),
    }
}

/// Builds a page of `count` records with ids `<prefix>-<n>`
pub(crate) fn page(prefix: &str, count: usize, cursor: Option<&str>, total: u64) -> Page {
    Page {
        records: (0..count)
            .map(|n| record(&format!("{}-{}", prefix, n), Some("tools")))
            .collect(),
        next_cursor: cursor.map(str::to_string),
        total,
    }
}
