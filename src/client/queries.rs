//! GraphQL documents and request bodies

use crate::config::{HarvestConfig, SortDirection};
use crate::model::Filters;
use serde_json::{json, Value};

/// Operation name of the category listing query
pub const CATEGORIES_OPERATION: &str = "GetCategories";

/// Operation name of the paged products query
pub const PRODUCTS_OPERATION: &str = "GetProducts";

/// Lists every category of the catalog
pub const CATEGORIES_QUERY: &str = r#"
query GetCategories {
  categories: categoriesV2 {
    nodes {
      id
      createdAt
      name
      weight
      slugifiedName
      thumbnail
      status
      longDescription
      shortDescription
      type: __typename
      __typename
    }
    __typename
  }
}
"#;

/// Fetches one page of products with their endpoints and response examples
pub const PRODUCTS_QUERY: &str = r#"
query GetProducts(
  $searchApiWhereInput: SearchApiWhereInput!,
  $paginationInput: PaginationInput,
  $searchApiOrderByInput: SearchApiOrderByInput
) {
  products: searchApis(
    where: $searchApiWhereInput
    pagination: $paginationInput
    orderBy: $searchApiOrderByInput
  ) {
    nodes {
      type: __typename
      __typename
      id
      name
      title
      description
      visibility
      slugifiedName
      pricing
      updatedAt
      category: categoryName
      thumbnail
      score {
        avgServiceLevel
        avgLatency
        avgSuccessRate
        popularityScore
        __typename
      }
      user: User {
        id
        username: username
        __typename
      }
      version {
        id
        endpoints {
          id
          isGraphQL
          route
          method
          name
          description
          params {
            parameters
          }
          responsePayloads {
            id
            name
            format
            body
            headers
            description
            type
            statusCode
            examples
            schema
          }
          __typename
        }
        __typename
      }
    }
    pageInfo {
      hasNextPage
      hasPreviousPage
      startCursor
      endCursor
      __typename
    }
    queryID
    replicaIndex
    total
    __typename
  }
}
"#;

/// Ordering applied to every products query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOrdering {
    pub field: String,
    pub direction: SortDirection,
}

impl QueryOrdering {
    pub fn from_config(config: &HarvestConfig) -> Self {
        Self {
            field: config.sort_field.clone(),
            direction: config.sort_direction,
        }
    }
}

impl Default for QueryOrdering {
    fn default() -> Self {
        Self::from_config(&HarvestConfig::default())
    }
}

/// Builds the request body for the category listing
pub fn categories_request() -> Value {
    json!({
        "operationName": CATEGORIES_OPERATION,
        "query": CATEGORIES_QUERY,
        "variables": {},
    })
}

/// Builds the request body for one page of products
///
/// The free-text `term` is always sent empty; `filters` are merged next to it
/// and win on key conflicts.
pub fn products_request(
    filters: &Filters,
    cursor: Option<&str>,
    page_size: u32,
    ordering: &QueryOrdering,
) -> Value {
    let mut where_input = serde_json::Map::new();
    where_input.insert("term".to_string(), json!(""));
    for (name, value) in filters {
        where_input.insert(name.clone(), value.clone());
    }

    json!({
        "operationName": PRODUCTS_OPERATION,
        "query": PRODUCTS_QUERY,
        "variables": {
            "searchApiWhereInput": where_input,
            "paginationInput": {
                "first": page_size,
                "after": cursor,
            },
            "searchApiOrderByInput": {
                "sortingFields": [
                    { "fieldName": ordering.field, "by": ordering.direction.as_str() }
                ]
            },
        },
    })
}
