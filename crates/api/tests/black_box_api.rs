use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;

use shopfront_api::app::{build_app_with_services, services::AppServices};
use shopfront_catalog::{CollectionView, LoadError, LoadOutcome, Page, PageFetcher, PageInfo, PageState, ProductLoader, QueryParams};
use shopfront_core::{CollectionHandle, Cursor};
use shopfront_infra::{HttpPageFetcher, InMemoryCatalog, UpstreamError};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(page_size: u32) -> Self {
        // Same router as prod over the seeded catalog, bound to an ephemeral port.
        let backend = Arc::new(InMemoryCatalog::demo().expect("demo catalog"));
        let app = build_app_with_services(AppServices::new(backend, page_size));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn get_json(client: &reqwest::Client, url: &str) -> (StatusCode, Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_is_ok_and_echoes_request_id() {
    let srv = TestServer::spawn(12).await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/health"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert!(!res.headers()["x-request-id"].is_empty());
}

#[tokio::test]
async fn home_lists_featured_collections_and_shop() {
    let srv = TestServer::spawn(12).await;
    let (status, body) = get_json(&reqwest::Client::new(), &srv.url("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shop"]["name"], "Snowdevil");
    assert_eq!(body["featuredCollections"].as_array().unwrap().len(), 3);

    let (status, body) = get_json(&reqwest::Client::new(), &srv.url("/layout")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shop"]["description"], "Boards and gear for every slope");
}

#[tokio::test]
async fn unknown_collection_is_404() {
    let srv = TestServer::spawn(12).await;
    let (status, body) = get_json(&reqwest::Client::new(), &srv.url("/collections/missing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn collection_view_reports_applied_filters_and_sort() {
    let srv = TestServer::spawn(12).await;
    let url = srv.url("/collections/snowboards?available=true&productVendor=Polar&minPrice=10&sort=price-high-low");
    let (status, body) = get_json(&reqwest::Client::new(), &url).await;

    assert_eq!(status, StatusCode::OK);
    let labels: Vec<_> = body["appliedFilters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, vec!["In stock", "Polar", "Min: $10"]);
    assert_eq!(body["appliedFilters"][2]["urlParam"]["key"], "minPrice");
    assert_eq!(body["sort"], serde_json::json!({ "sortKey": "PRICE", "reverse": true }));
    assert_eq!(body["analytics"]["pageType"], "collection");
    assert_eq!(body["analytics"]["handle"], "snowboards");
    assert_eq!(body["isEmpty"], false);

    let selected: Vec<_> = body["sortOptions"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|o| o["selected"] == true)
        .collect();
    assert_eq!(selected.len(), 1);

    let view: CollectionView = serde_json::from_value(body).unwrap();
    let mut previous = f64::INFINITY;
    for product in &view.collection.products.nodes {
        let price: f64 = product.first_variant().unwrap().price.amount.parse().unwrap();
        assert!(price <= previous);
        previous = price;
    }
}

#[tokio::test]
async fn empty_collection_sets_is_empty() {
    let srv = TestServer::spawn(12).await;
    let (status, body) = get_json(&reqwest::Client::new(), &srv.url("/collections/clearance")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isEmpty"], true);
    assert_eq!(body["collection"]["products"]["pageInfo"]["hasNextPage"], false);
}

#[tokio::test]
async fn invalid_handle_is_400() {
    let srv = TestServer::spawn(12).await;
    let (status, body) = get_json(&reqwest::Client::new(), &srv.url("/collections/a%20b")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_handle");
}

#[tokio::test]
async fn loader_pages_through_the_collection_endpoint() {
    let srv = TestServer::spawn(5).await;
    let client = reqwest::Client::new();
    let selection = QueryParams::parse("sort=newest");

    let first_url = format!("{}?{}", srv.url("/collections/snowboards"), selection.to_query_string());
    let (status, body) = get_json(&client, &first_url).await;
    assert_eq!(status, StatusCode::OK);
    let view: CollectionView = serde_json::from_value(body).unwrap();

    let fetcher = HttpPageFetcher::new(client, srv.url("/collections/snowboards"), selection);
    let loader = ProductLoader::new(
        CollectionHandle::parse("snowboards").unwrap(),
        PageState::from_page(view.into_page()),
        fetcher,
    );
    let mut updates = loader.subscribe();

    assert_eq!(loader.load_next_page().await.unwrap(), LoadOutcome::Merged { appended: 5 });
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().products.len(), 10);

    assert_eq!(loader.load_next_page().await.unwrap(), LoadOutcome::Merged { appended: 4 });
    assert_eq!(loader.load_next_page().await.unwrap(), LoadOutcome::Exhausted);

    let state = loader.current_state();
    assert_eq!(state.products.len(), 14);
    // Newest first, carried across pages.
    let dates: Vec<_> = state.products.iter().map(|p| p.published_at).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn page_fetch_for_a_missing_collection_is_a_status_error() {
    let srv = TestServer::spawn(12).await;
    let fetcher = HttpPageFetcher::new(reqwest::Client::new(), srv.url("/collections/retired"), QueryParams::new());

    match fetcher.fetch_page(&Cursor::new("offset:12")).await {
        Err(UpstreamError::Status { status, body }) => {
            assert_eq!(status, 404);
            assert!(body.contains("not_found"));
        }
        other => panic!("expected a 404 status error, got {other:?}"),
    }

    // Through the loader the failure surfaces and the state stays as seeded.
    let seeded = PageState::from_page(Page {
        products: Vec::new(),
        page_info: PageInfo {
            has_next_page: true,
            end_cursor: Some(Cursor::new("offset:12")),
        },
    });
    let loader = ProductLoader::new(CollectionHandle::parse("retired").unwrap(), seeded.clone(), fetcher);
    let err = loader.load_next_page().await.unwrap_err();
    assert!(matches!(err, LoadError::Fetch(UpstreamError::Status { status: 404, .. })));
    assert_eq!(loader.current_state(), seeded);
    assert!(!loader.is_fetching());
}
