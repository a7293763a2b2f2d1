//! GraphQL catalog client
//!
//! This module handles all HTTP requests to the catalog service, including:
//! - Building the HTTP client with the session credential headers
//! - Posting the products and categories queries
//! - Degrading non-success product pages to an empty page
//! - Decoding the response envelopes

use crate::client::queries::{
    categories_request, products_request, QueryOrdering, CATEGORIES_OPERATION, PRODUCTS_OPERATION,
};
use crate::client::traits::{CatalogClient, GroupingSource, PageRequest};
use crate::config::{Credentials, RemoteConfig};
use crate::model::{Grouping, Page, Record};
use crate::HarvestError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Builds an HTTP client that sends the session credentials on every request
///
/// # Arguments
///
/// * `config` - The remote service configuration
/// * `credentials` - Opaque session credentials
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(HarvestError)` - A credential is not valid header text, or the
///   client could not be built
///
/// # Example
///
/// ```no_run
/// use catalog_harvester::client::build_http_client;
/// use catalog_harvester::config::{Credentials, RemoteConfig};
///
/// let credentials = Credentials::new("token", "session=abc");
/// let client = build_http_client(&RemoteConfig::default(), &credentials).unwrap();
/// ```
pub fn build_http_client(
    config: &RemoteConfig,
    credentials: &Credentials,
) -> Result<Client, HarvestError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("csrf-token", header_value("csrf-token", &credentials.csrf_token)?);
    headers.insert("cookie", header_value("cookie", &credentials.cookie)?);

    let mut builder = Client::builder()
        .default_headers(headers)
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }

    Ok(builder.build()?)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, HarvestError> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        HarvestError::InvalidCredentials(format!("{} is not a valid header value", name))
    })?;
    header.set_sensitive(true);
    Ok(header)
}

/// Catalog client backed by the remote GraphQL endpoint
pub struct GraphqlCatalog {
    client: Client,
    endpoint: String,
    ordering: QueryOrdering,
}

impl GraphqlCatalog {
    /// Creates a catalog client posting to `endpoint`
    pub fn new(client: Client, endpoint: impl Into<String>, ordering: QueryOrdering) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            ordering,
        }
    }

    /// Builds the HTTP client and wraps it in one step
    pub fn connect(
        config: &RemoteConfig,
        credentials: &Credentials,
        ordering: QueryOrdering,
    ) -> Result<Self, HarvestError> {
        let client = build_http_client(config, credentials)?;
        Ok(Self::new(client, config.endpoint.clone(), ordering))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, body: &Value) -> Result<reqwest::Response, HarvestError> {
        self.client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|source| HarvestError::Http {
                url: self.endpoint.clone(),
                source,
            })
    }
}

#[async_trait]
impl CatalogClient for GraphqlCatalog {
    async fn fetch_page(&self, request: PageRequest<'_>) -> crate::Result<Page> {
        let body = products_request(
            request.filters,
            request.cursor,
            request.page_size,
            &self.ordering,
        );

        tracing::debug!(
            "Requesting {} records after cursor {:?}",
            request.page_size,
            request.cursor
        );
        let response = self.post(&body).await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(
                "Products query failed with HTTP {}: {}",
                status.as_u16(),
                text
            );
            return Ok(Page::empty());
        }

        let bytes = response.bytes().await.map_err(|source| HarvestError::Http {
            url: self.endpoint.clone(),
            source,
        })?;
        let data: ProductsData = decode_envelope(PRODUCTS_OPERATION, &bytes)?;
        let products = data.products;

        Ok(Page {
            records: products.nodes,
            next_cursor: products.page_info.end_cursor,
            total: products.total,
        })
    }
}

#[async_trait]
impl GroupingSource for GraphqlCatalog {
    async fn list_groupings(&self) -> crate::Result<Vec<Grouping>> {
        let response = self.post(&categories_request()).await?;
        let response = response
            .error_for_status()
            .map_err(|source| HarvestError::Http {
                url: self.endpoint.clone(),
                source,
            })?;

        let bytes = response.bytes().await.map_err(|source| HarvestError::Http {
            url: self.endpoint.clone(),
            source,
        })?;
        let data: CategoriesData = decode_envelope(CATEGORIES_OPERATION, &bytes)?;

        tracing::debug!("Service reported {} categories", data.categories.nodes.len());
        Ok(data.categories.nodes)
    }
}

/// Decodes a GraphQL response envelope, requiring a `data` member
fn decode_envelope<T: DeserializeOwned>(operation: &str, bytes: &[u8]) -> Result<T, HarvestError> {
    let malformed = |message: String| HarvestError::MalformedResponse {
        operation: operation.to_string(),
        message,
    };

    let envelope: Envelope<T> =
        serde_json::from_slice(bytes).map_err(|e| malformed(e.to_string()))?;

    match envelope.data {
        Some(data) => Ok(data),
        None => Err(malformed(match envelope.errors {
            Some(errors) => format!("no data, errors: {}", errors),
            None => "no data".to_string(),
        })),
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: ProductsConnection,
}

#[derive(Debug, Deserialize)]
struct ProductsConnection {
    nodes: Vec<Record>,
    #[serde(rename = "pageInfo")]
    page_info: PageInfo,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(default, rename = "endCursor")]
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategoriesData {
    categories: CategoriesConnection,
}

#[derive(Debug, Deserialize)]
struct CategoriesConnection {
    nodes: Vec<Grouping>,
}
