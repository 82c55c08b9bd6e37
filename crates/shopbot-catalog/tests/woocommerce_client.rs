//! Integration tests for `WooCommerceClient` and `WooCommerceCatalog`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the happy paths (empty, single-page,
//! multi-page, by-id), request shape (auth, filters) and every error variant
//! the client can return.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopbot_catalog::{
    normalize, CatalogError, CatalogQuery, CatalogSource, WooCommerceCatalog, WooCommerceClient,
};

const PRODUCTS_PATH: &str = "/wp-json/wc/v3/products";

/// `ck_test:cs_test` base64-encoded.
const BASIC_AUTH: &str = "Basic Y2tfdGVzdDpjc190ZXN0";

/// Builds a client suitable for tests: 5-second timeout, no retries.
fn test_client(server: &MockServer) -> WooCommerceClient {
    test_client_with_retries(server, 0, 0)
}

fn test_client_with_retries(
    server: &MockServer,
    max_retries: u32,
    backoff_base_secs: u64,
) -> WooCommerceClient {
    WooCommerceClient::new(
        &server.uri(),
        "ck_test",
        "cs_test",
        5,
        "shopbot-test/0.1",
        max_retries,
        backoff_base_secs,
    )
    .expect("failed to build test WooCommerceClient")
}

fn product_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "permalink": format!("https://shop.example.com/produkt/{id}/"),
        "short_description": "<p>Kurz</p>",
        "regular_price": "49.90",
        "sale_price": "",
        "stock_status": "instock",
        "categories": [{"id": 15, "name": "Steroide", "slug": "steroide"}],
        "attributes": [{"id": 1, "name": "Hersteller", "options": ["Medi Pharma"]}]
    })
}

fn page_query(limit: u32) -> CatalogQuery {
    CatalogQuery::new(limit)
}

// ---------------------------------------------------------------------------
// single page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_products_page_sends_auth_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(header("authorization", BASIC_AUTH))
        .and(query_param("per_page", "15"))
        .and(query_param("status", "publish"))
        .and(query_param("search", "testosteron"))
        .and(query_param("category", "21"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(1, "Ripomed 250")]))
                .insert_header("X-WP-TotalPages", "1"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let query = CatalogQuery::new(15)
        .with_search("testosteron")
        .with_category("21");
    let (records, info) = test_client(&server)
        .fetch_products_page(&query, 1)
        .await
        .expect("page fetch should succeed");

    assert_eq!(records.len(), 1);
    assert_eq!(info.total_pages, Some(1));
    assert_eq!(info.next_page, None);

    let product = normalize(&records[0]);
    assert_eq!(product.name, "Ripomed 250");
    assert_eq!(product.manufacturer, "Medi Pharma");
    assert_eq!(product.regular_price, Some(49.9));
    assert_eq!(product.sale_price, None);
}

#[tokio::test]
async fn fetch_products_page_reports_next_page_from_link_header() {
    let server = MockServer::start().await;
    let next_link = format!(
        "<{base}{PRODUCTS_PATH}?per_page=1&page=2>; rel=\"next\"",
        base = server.uri()
    );

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(1, "A")]))
                .insert_header("Link", next_link.as_str())
                .insert_header("X-WP-TotalPages", "2"),
        )
        .mount(&server)
        .await;

    let (_, info) = test_client(&server)
        .fetch_products_page(&page_query(1), 1)
        .await
        .unwrap();
    assert_eq!(info.next_page, Some(2));
    assert_eq!(info.total_pages, Some(2));
}

#[tokio::test]
async fn fetch_products_page_derives_next_page_from_total_without_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(1, "A")]))
                .insert_header("X-WP-TotalPages", "3"),
        )
        .mount(&server)
        .await;

    let (_, info) = test_client(&server)
        .fetch_products_page(&page_query(1), 2)
        .await
        .unwrap();
    assert_eq!(info.next_page, Some(3));
}

#[tokio::test]
async fn fetch_product_by_id_returns_single_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PRODUCTS_PATH}/4711")))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(4711, "Ripomed")))
        .mount(&server)
        .await;

    let record = test_client(&server).fetch_product_by_id(4711).await.unwrap();
    assert_eq!(record.as_value()["id"], 4711);
}

#[tokio::test]
async fn fetch_product_by_id_unknown_id_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{PRODUCTS_PATH}/999")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "woocommerce_rest_product_invalid_id",
            "message": "Ungültige ID.",
            "data": {"status": 404}
        })))
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_product_by_id(999).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// fetch_all_products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_all_products_returns_empty_vec_when_store_has_no_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .insert_header("X-WP-TotalPages", "0"),
        )
        .mount(&server)
        .await;

    let result = test_client(&server)
        .fetch_all_products(&page_query(100), 0)
        .await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_all_products_follows_pagination_across_multiple_pages() {
    let server = MockServer::start().await;
    let next_link = format!(
        "<{base}{PRODUCTS_PATH}?per_page=1&page=2>; rel=\"next\"",
        base = server.uri()
    );

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(1, "A")]))
                .insert_header("Link", next_link.as_str())
                .insert_header("X-WP-TotalPages", "2"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(2, "B")]))
                .insert_header("X-WP-TotalPages", "2"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let records = test_client(&server)
        .fetch_all_products(&page_query(1), 0)
        .await
        .expect("multi-page fetch should succeed");
    assert_eq!(records.len(), 2, "expected 2 products across 2 pages");
    assert_eq!(records[0].as_value()["id"], 1);
    assert_eq!(records[1].as_value()["id"], 2);
}

#[tokio::test]
async fn fetch_all_products_second_page_failure_propagates_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(1, "A")]))
                .insert_header("X-WP-TotalPages", "2"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_all_products(&page_query(1), 0)
        .await
        .unwrap_err();
    assert!(
        matches!(err, CatalogError::UnexpectedStatus { status: 502, .. }),
        "partial catalogs must not be returned, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_stops_at_pagination_limit() {
    let server = MockServer::start().await;

    // Every page claims there are more pages than the client will follow.
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .insert_header("X-WP-TotalPages", "1000"),
        )
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_all_products(&page_query(1), 0)
        .await
        .unwrap_err();
    assert!(
        matches!(err, CatalogError::PaginationLimit { max_pages: 100, .. }),
        "got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limit_error_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_products_page(&page_query(10), 1)
        .await
        .unwrap_err();
    match err {
        CatalogError::RateLimited {
            domain,
            retry_after_secs,
        } => {
            assert_eq!(domain, "127.0.0.1");
            assert_eq!(retry_after_secs, 30);
        }
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_credentials_map_to_unauthorized() {
    for status in [401u16, 403] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PRODUCTS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "code": "woocommerce_rest_cannot_view",
                "message": "Sorry, you cannot list resources.",
                "data": {"status": status}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client_with_retries(&server, 2, 0)
            .fetch_products_page(&page_query(10), 1)
            .await
            .unwrap_err();
        assert!(
            matches!(err, CatalogError::Unauthorized { status: s, .. } if s == status),
            "status {status}: got {err:?}"
        );
    }
}

#[tokio::test]
async fn malformed_json_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_products_page(&page_query(10), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn object_body_on_listing_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_products_page(&page_query(10), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Deserialize { .. }), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// retries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn retries_after_429_and_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json(42, "X")])))
        .mount(&server)
        .await;

    let (records, _) = test_client_with_retries(&server, 1, 0)
        .fetch_products_page(&page_query(10), 1)
        .await
        .expect("expected Ok after retry");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].as_value()["id"], 42);
}

#[tokio::test]
async fn returns_error_after_exhausting_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2) // 1 initial + 1 retry
        .mount(&server)
        .await;

    let err = test_client_with_retries(&server, 1, 0)
        .fetch_products_page(&page_query(10), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::RateLimited { .. }));
}

#[tokio::test]
async fn retries_after_503_and_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json(77, "Y")])))
        .mount(&server)
        .await;

    let (records, _) = test_client_with_retries(&server, 1, 0)
        .fetch_products_page(&page_query(10), 1)
        .await
        .expect("expected Ok after 503 retry");
    assert_eq!(records[0].as_value()["id"], 77);
}

// ---------------------------------------------------------------------------
// CatalogSource adapter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn woocommerce_catalog_loads_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(1, "A"), product_json(2, "B")]))
                .insert_header("X-WP-TotalPages", "5"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let catalog = WooCommerceCatalog::new(test_client(&server));
    let records = catalog.load(&CatalogQuery::new(8)).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(catalog.kind(), "woocommerce");
}
