use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Filter name to filter value mapping sent with each products query
pub type Filters = Map<String, Value>;

/// A named category of the remote catalog
///
/// Produced once by the category enumeration at the start of a run and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Grouping {
    /// Remote identifier, when the service reports one
    #[serde(default)]
    pub id: Option<String>,

    /// Category name, used both as the query filter and for logging
    pub name: String,

    /// Slugified category name, when the service reports one
    #[serde(default, rename = "slugifiedName")]
    pub slugified_name: Option<String>,
}

impl Grouping {
    /// Creates a grouping from just its name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            slugified_name: None,
        }
    }

    /// Returns the filters that restrict a products query to this grouping
    pub fn filters(&self) -> Filters {
        let mut filters = Map::new();
        filters.insert("categoryNames".to_string(), json!([self.name]));
        filters
    }
}
