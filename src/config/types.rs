use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Default GraphQL endpoint of the remote catalog
pub const DEFAULT_ENDPOINT: &str = "https://rapidapi.com/gateway/graphql";

/// Main configuration structure for Catalog Harvester
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RemoteConfig {
    /// GraphQL endpoint every request is posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds; unset blocks until the request resolves
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Harvest behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HarvestConfig {
    /// Number of records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Root of the persisted record tree
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Number of groupings to skip at the start of the enumeration
    #[serde(default)]
    pub offset: usize,

    /// Safety bound on pages fetched per grouping; unset means unbounded
    #[serde(default)]
    pub max_pages_per_grouping: Option<u32>,

    /// Field the products query is ordered by
    #[serde(default = "default_sort_field")]
    pub sort_field: String,

    /// Ordering direction for `sort_field`
    #[serde(default)]
    pub sort_direction: SortDirection,
}

/// Products query ordering direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    /// Returns the wire representation expected by the remote service
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque session credentials forwarded as request headers
///
/// These only ever come from the command line.
#[derive(Clone)]
pub struct Credentials {
    pub csrf_token: String,
    pub cookie: String,
}

impl Credentials {
    pub fn new(csrf_token: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            cookie: cookie.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("csrf_token", &"<redacted>")
            .field("cookie", &"<redacted>")
            .finish()
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: None,
            user_agent: None,
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            output_dir: default_output_dir(),
            offset: 0,
            max_pages_per_grouping: None,
            sort_field: default_sort_field(),
            sort_direction: SortDirection::default(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_sort_field() -> String {
    "installsAllTime".to_string()
}
