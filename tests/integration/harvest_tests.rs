//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the GraphQL catalog service and
//! exercise a full run end-to-end, down to the files on disk.

use catalog_harvester::config::{Config, Credentials, HarvestConfig, RemoteConfig};
use catalog_harvester::harvest::run_harvest;
use catalog_harvester::output::collect_statistics;
use catalog_harvester::HarvestError;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const GRAPHQL_PATH: &str = "/gateway/graphql";

/// Matches the category listing request
struct CategoriesQuery;

impl Match for CategoriesQuery {
    fn matches(&self, request: &Request) -> bool {
        serde_json::from_slice::<Value>(&request.body)
            .map(|body| body["operationName"] == "GetCategories")
            .unwrap_or(false)
    }
}

/// Matches one products page request by category and cursor
struct ProductsPage {
    category: &'static str,
    after: Option<&'static str>,
}

impl Match for ProductsPage {
    fn matches(&self, request: &Request) -> bool {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return false;
        };
        let variables = &body["variables"];

        body["operationName"] == "GetProducts"
            && variables["searchApiWhereInput"]["term"] == ""
            && variables["searchApiWhereInput"]["categoryNames"][0] == self.category
            && variables["paginationInput"]["after"] == json!(self.after)
    }
}

fn products_page(category: &'static str, after: Option<&'static str>) -> ProductsPage {
    ProductsPage { category, after }
}

fn create_test_config(server: &MockServer, output_dir: &Path, page_size: u32) -> Config {
    Config {
        remote: RemoteConfig {
            endpoint: format!("{}{}", server.uri(), GRAPHQL_PATH),
            ..RemoteConfig::default()
        },
        harvest: HarvestConfig {
            page_size,
            output_dir: output_dir.to_path_buf(),
            ..HarvestConfig::default()
        },
    }
}

fn credentials() -> Credentials {
    Credentials::new("test-csrf", "session=test")
}

fn product(id: &str, category: Option<&str>, slug: &str) -> Value {
    json!({
        "__typename": "Api",
        "id": id,
        "name": slug,
        "slugifiedName": slug,
        "category": category,
        "version": {
            "id": format!("{}-v1", id),
            "endpoints": [
                {"id": format!("{}-e1", id), "responsePayloads": [{"id": "r1", "statusCode": 200}]}
            ]
        }
    })
}

fn products_response(nodes: Vec<Value>, end_cursor: Option<&str>, total: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "products": {
                "nodes": nodes,
                "pageInfo": {"endCursor": end_cursor, "hasNextPage": end_cursor.is_some()},
                "total": total
            }
        }
    }))
}

fn numbered_products(prefix: &str, category: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|n| {
            let id = format!("{}-{}", prefix, n);
            product(&id, Some(category), &id)
        })
        .collect()
}

async fn mount_categories(server: &MockServer, names: &[&str]) {
    let nodes: Vec<Value> = names
        .iter()
        .map(|name| json!({"id": format!("cat-{}", name), "name": name}))
        .collect();

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(CategoriesQuery)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"categories": {"nodes": nodes}}})),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_full_harvest_three_pages() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_categories(&server, &["Tools"]).await;

    Mock::given(method("POST"))
        .and(products_page("Tools", None))
        .respond_with(products_response(numbered_products("a", "Tools", 10), Some("c1"), 23))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(products_page("Tools", Some("c1")))
        .respond_with(products_response(numbered_products("b", "Tools", 10), Some("c2"), 23))
        .expect(1)
        .mount(&server)
        .await;
    // Short final page still carries a cursor; it must end the grouping anyway
    Mock::given(method("POST"))
        .and(products_page("Tools", Some("c2")))
        .respond_with(products_response(numbered_products("c", "Tools", 3), Some("c3"), 23))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, output.path(), 10);
    let summary = run_harvest(&config, &credentials()).await.unwrap();

    assert_eq!(summary.groupings, 1);
    assert_eq!(summary.pages, 3);
    assert_eq!(summary.records_persisted, 23);
    assert_eq!(summary.unique_records, 23);
    assert_eq!(count_files(&output.path().join("Tools")), 23);

    let stats = collect_statistics(output.path()).unwrap();
    assert_eq!(stats.products, 23);
    assert_eq!(stats.endpoints, 23);
    assert_eq!(stats.endpoint_examples, 23);
}

#[tokio::test]
async fn test_server_error_moves_to_next_grouping() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_categories(&server, &["Broken", "Healthy"]).await;

    Mock::given(method("POST"))
        .and(products_page("Broken", None))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(products_page("Healthy", None))
        .respond_with(products_response(numbered_products("h", "Healthy", 2), None, 2))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, output.path(), 10);
    let summary = run_harvest(&config, &credentials()).await.unwrap();

    assert_eq!(summary.groupings, 2);
    assert_eq!(summary.records_persisted, 2);
    assert!(!output.path().join("Broken").exists());
    assert_eq!(count_files(&output.path().join("Healthy")), 2);
}

#[tokio::test]
async fn test_record_paths() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_categories(&server, &["tools"]).await;

    Mock::given(method("POST"))
        .and(products_page("tools", None))
        .respond_with(products_response(
            vec![
                product("x1", Some("tools"), "foo"),
                product("x2", None, "orphan"),
            ],
            None,
            2,
        ))
        .mount(&server)
        .await;

    let config = create_test_config(&server, output.path(), 10);
    run_harvest(&config, &credentials()).await.unwrap();

    let stored = std::fs::read_to_string(output.path().join("tools").join("foo.json")).unwrap();
    let stored: Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored, product("x1", Some("tools"), "foo"));

    assert!(output.path().join("None").join("orphan.json").is_file());
}

#[tokio::test]
async fn test_overlapping_groupings_counted_once() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_categories(&server, &["Alpha", "Beta"]).await;

    let shared = product("shared", Some("Alpha"), "shared");
    Mock::given(method("POST"))
        .and(products_page("Alpha", None))
        .respond_with(products_response(
            vec![product("a1", Some("Alpha"), "a1"), shared.clone()],
            None,
            2,
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(products_page("Beta", None))
        .respond_with(products_response(
            vec![shared, product("b1", Some("Beta"), "b1")],
            None,
            2,
        ))
        .mount(&server)
        .await;

    let config = create_test_config(&server, output.path(), 5);
    let summary = run_harvest(&config, &credentials()).await.unwrap();

    assert_eq!(summary.records_persisted, 4);
    assert_eq!(summary.unique_records, 3);
    assert_eq!(summary.slug_collisions, 0);
    assert_eq!(collect_statistics(output.path()).unwrap().products, 3);
}

#[tokio::test]
async fn test_offset_skips_categories() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_categories(&server, &["Skipped", "Kept"]).await;

    Mock::given(method("POST"))
        .and(products_page("Skipped", None))
        .respond_with(products_response(numbered_products("s", "Skipped", 1), None, 1))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(products_page("Kept", None))
        .respond_with(products_response(numbered_products("k", "Kept", 1), None, 1))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config(&server, output.path(), 10);
    config.harvest.offset = 1;
    let summary = run_harvest(&config, &credentials()).await.unwrap();

    assert_eq!(summary.groupings, 1);
}

#[tokio::test]
async fn test_credentials_sent_as_headers() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(header("csrf-token", "test-csrf"))
        .and(header("cookie", "session=test"))
        .and(header("content-type", "application/json"))
        .and(CategoriesQuery)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"categories": {"nodes": []}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, output.path(), 10);
    let summary = run_harvest(&config, &credentials()).await.unwrap();

    assert_eq!(summary.groupings, 0);
}

#[tokio::test]
async fn test_category_listing_failure_is_fatal() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(CategoriesQuery)
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = create_test_config(&server, output.path(), 10);
    let result = run_harvest(&config, &credentials()).await;

    assert!(matches!(result, Err(HarvestError::Http { .. })));
}

#[tokio::test]
async fn test_malformed_products_response_is_fatal() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();
    mount_categories(&server, &["Tools", "Later"]).await;

    Mock::given(method("POST"))
        .and(products_page("Tools", None))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": null, "errors": [{"message": "boom"}]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(products_page("Later", None))
        .respond_with(products_response(vec![], None, 0))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server, output.path(), 10);
    let result = run_harvest(&config, &credentials()).await;

    assert!(matches!(result, Err(HarvestError::MalformedResponse { .. })));
}
