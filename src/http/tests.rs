//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_client(base_url: &str) -> HttpClient {
    HttpClient::with_config(HttpClientConfig::new(base_url)).unwrap()
}

/// Responds like the items endpoint, computing the page from the query
fn items_responder(request: &Request) -> ResponseTemplate {
    let param = |name: &str| {
        request
            .url
            .query_pairs()
            .find(|(k, _)| k == name)
            .and_then(|(_, v)| v.parse::<u64>().ok())
            .unwrap_or(0)
    };
    let (total, page, per_page) = (param("total"), param("page"), param("per_page"));
    if page == 0 {
        return ResponseTemplate::new(400).set_body_string("page must be positive");
    }

    let start = per_page * (page - 1);
    let end = (start + per_page).min(total);
    let items: Vec<u64> = (start + 1..=end).collect();
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "items": items,
        "count": total,
    }))
}

// ============================================================================
// HttpClient
// ============================================================================

#[test]
fn test_http_client_config() {
    let config = HttpClientConfig::new("http://localhost:3000");
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);

    let config = config.with_timeout(Duration::from_secs(5));
    assert_eq!(config.base_url, "http://localhost:3000");
    assert_eq!(config.timeout, Duration::from_secs(5));
}

#[test_case("http://localhost:3000", "/items", "http://localhost:3000/items" ; "bare host")]
#[test_case("http://localhost:3000/", "items", "http://localhost:3000/items" ; "trailing slash")]
#[test_case("http://example.com/api", "/items", "http://example.com/api/items" ; "base path kept")]
#[test_case("http://example.com/api/", "/v2/items", "http://example.com/api/v2/items" ; "nested path")]
fn test_endpoint(base_url: &str, path: &str, expected: &str) {
    let client = test_client(base_url);
    assert_eq!(client.endpoint(path).unwrap().as_str(), expected);
}

#[test]
fn test_rejects_invalid_base_url() {
    let err = HttpClient::with_config(HttpClientConfig::new("not a url")).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));

    let err = HttpClient::with_config(HttpClientConfig::new("mailto:items@example.com"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[tokio::test]
async fn test_get_json_serializes_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "rust"))
        .and(query_param("limit", "3"))
        .and(header("user-agent", concat!("pagestream/", env!("CARGO_PKG_VERSION"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": 42
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api", mock_server.uri()));
    let data: serde_json::Value = client
        .get_json("/search", &[("q", "rust"), ("limit", "3")])
        .await
        .unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_error_status_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .get_json::<_, serde_json::Value>("/items", &[("page", 1)])
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "try later");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let result: crate::Result<ItemsPage> = client.get_json("/items", &[("page", 1)]).await;
    assert!(matches!(result, Err(Error::Http(_))));
}

// ============================================================================
// ItemsClient
// ============================================================================

#[tokio::test]
async fn test_list_items_sends_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("total", "20"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [6, 7, 8, 9, 10],
            "count": 20
        })))
        .mount(&mock_server)
        .await;

    let client = ItemsClient::new(test_client(&mock_server.uri()));
    let page = client
        .list_items(ListItemsRequest {
            total: 20,
            page: 2,
            per_page: 5,
        })
        .await
        .unwrap();

    assert_eq!(
        page,
        ItemsPage {
            items: vec![6, 7, 8, 9, 10],
            count: 20
        }
    );
}

#[tokio::test]
async fn test_items_client_custom_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/things"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [1],
            "count": 1
        })))
        .mount(&mock_server)
        .await;

    let client = ItemsClient::new(test_client(&mock_server.uri())).with_path("/v2/things");
    let page = client
        .list_items(ListItemsRequest {
            total: 1,
            page: 1,
            per_page: 5,
        })
        .await
        .unwrap();
    assert_eq!(page.items, vec![1]);
}

#[tokio::test]
async fn test_pages_fetches_every_page_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(items_responder)
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = ItemsClient::new(test_client(&mock_server.uri()));
    let pages: Vec<ItemsPage> = client.pages(20, 5, 1, None).try_collect().await.unwrap();

    let items: Vec<u64> = pages.into_iter().flat_map(|p| p.items).collect();
    assert_eq!(items, (1..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_pages_respects_max_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(items_responder)
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = ItemsClient::new(test_client(&mock_server.uri()));
    let pages: Vec<ItemsPage> = client
        .pages(100, 10, 1, Some(2))
        .try_collect()
        .await
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].items.first(), Some(&11));
}

#[tokio::test]
async fn test_pages_invalid_initial_page_surfaces_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(items_responder)
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ItemsClient::new(test_client(&mock_server.uri()));
    let results: Vec<crate::Result<ItemsPage>> = client.pages(20, 5, 0, None).collect().await;

    assert_eq!(results.len(), 1);
    match &results[0] {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(*status, 400);
            assert_eq!(body, "page must be positive");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pages_stops_after_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "1"))
        .respond_with(items_responder)
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ItemsClient::new(test_client(&mock_server.uri()));
    let results: Vec<crate::Result<ItemsPage>> = client.pages(20, 5, 1, None).collect().await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().items, vec![1, 2, 3, 4, 5]);
    assert!(matches!(
        results[1],
        Err(Error::HttpStatus { status: 500, .. })
    ));
}
