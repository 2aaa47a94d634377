//! Cursor pagination against a mock Notion server.

use futures::stream::{StreamExt, TryStreamExt};
use notions::api::{SearchFilter, SearchObjectKind};
use notions::{
    ApiKey, AppError, ClientConfig, Database, DatabaseId, NotionErrorCode, NotionHttpClient,
    Page, QueryDatabaseRequest, SearchRequest, SearchResult, ValidatedUrl, ValidationError,
};
use pretty_assertions::assert_eq;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_JSON: &str = include_str!("fixtures/page.json");
const DATABASE_JSON: &str = include_str!("fixtures/database.json");
const DATABASE_ID: &str = "fff51adc-8d4e-414a-a2e3-17e69111c328";
const API_KEY: &str = "secret_abcdefghijklmnopqrstuvwxyz";

fn client_for(server: &MockServer) -> NotionHttpClient {
    let config = ClientConfig::new(ApiKey::new(API_KEY).unwrap())
        .unwrap()
        .with_base_url(ValidatedUrl::parse(&server.uri()).unwrap());
    NotionHttpClient::new(&config).unwrap()
}

fn with_id(fixture: &str, id: &str) -> Value {
    let mut value: Value = serde_json::from_str(fixture).unwrap();
    value["id"] = json!(id);
    value
}

fn page(id: &str) -> Value {
    with_id(PAGE_JSON, id)
}

fn database(id: &str) -> Value {
    with_id(DATABASE_JSON, id)
}

fn envelope(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "next_cursor": next_cursor,
        "has_more": next_cursor.is_some(),
    })
}

fn ids<T>(items: &[T], id: impl Fn(&T) -> uuid::Uuid) -> Vec<String> {
    items.iter().map(|item| id(item).to_string()).collect()
}

const ID_A: &str = "00000000-0000-4000-8000-00000000000a";
const ID_B: &str = "00000000-0000-4000-8000-00000000000b";
const ID_C: &str = "00000000-0000-4000-8000-00000000000c";

#[tokio::test]
async fn test_list_databases_threads_cursor_through_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/databases"))
        .and(query_param("start_cursor", "cursor-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![database(ID_C)], None)))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/databases"))
        .and(query_param("start_cursor", "cursor-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![database(ID_B)], Some("cursor-2"))),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/databases"))
        .and(query_param("page_size", "100"))
        .and(header("Notion-Version", "2022-06-28"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![database(ID_A)], Some("cursor-1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let databases: Vec<Database> = client_for(&server).list_databases().try_collect().await.unwrap();

    assert_eq!(ids(&databases, |d| *d.id.as_uuid()), vec![ID_A, ID_B, ID_C]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_query_database_threads_cursor_through_body() {
    let server = MockServer::start().await;
    let query_path = format!("/v1/databases/{}/query", DATABASE_ID);

    Mock::given(method("POST"))
        .and(path(query_path.as_str()))
        .and(body_partial_json(json!({"start_cursor": "cursor-1", "page_size": 100})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(vec![page(ID_C)], None)),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(query_path.as_str()))
        .and(body_partial_json(json!({"page_size": 100})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![page(ID_A), page(ID_B)], Some("cursor-1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let id = DatabaseId::parse(DATABASE_ID).unwrap();
    let pages: Vec<Page> = client_for(&server)
        .query_database(&id, &QueryDatabaseRequest::default())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids(&pages, |p| *p.id.as_uuid()), vec![ID_A, ID_B, ID_C]);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let first: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(first.get("start_cursor").is_none());
}

#[tokio::test]
async fn test_single_page_envelope_is_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/databases/{}/query", DATABASE_ID).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![page(ID_A)], None)))
        .expect(1)
        .mount(&server)
        .await;

    let id = DatabaseId::parse(DATABASE_ID).unwrap();
    let pages: Vec<Page> = client_for(&server)
        .query_database(&id, &QueryDatabaseRequest::default())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].title(), "Fields filled in");
}

#[tokio::test]
async fn test_search_yields_pages_and_databases_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .and(body_partial_json(json!({"query": "API", "filter": {"property": "object"}})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![page(ID_A), database(ID_B)], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest::query("API").with_filter(SearchFilter::only(SearchObjectKind::Page));
    let hits: Vec<SearchResult> = client_for(&server).search(&request).try_collect().await.unwrap();

    assert_eq!(hits.len(), 2);
    assert!(matches!(hits[0], SearchResult::Page(_)));
    assert!(matches!(hits[1], SearchResult::Database(_)));
}

#[tokio::test]
async fn test_http_error_carries_status_and_body() {
    let server = MockServer::start().await;
    let body = json!({
        "object": "error",
        "status": 404,
        "code": "object_not_found",
        "message": "Could not find database with ID: fff51adc."
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let id = DatabaseId::parse(DATABASE_ID).unwrap();
    let results: Vec<Result<Page, AppError>> = client_for(&server)
        .query_database(&id, &QueryDatabaseRequest::default())
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    match &results[0] {
        Err(AppError::HttpStatus {
            status,
            code,
            message,
            body: raw,
        }) => {
            assert_eq!(*status, StatusCode::NOT_FOUND);
            assert_eq!(code, &Some(NotionErrorCode::ObjectNotFound));
            assert_eq!(message.as_deref(), Some("Could not find database with ID: fff51adc."));
            assert_eq!(serde_json::from_str::<Value>(raw).unwrap(), body);
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failure_mid_stream_ends_after_the_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/databases"))
        .and(query_param("start_cursor", "cursor-1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/databases"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![database(ID_A)], Some("cursor-1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let results: Vec<Result<Database, AppError>> =
        client_for(&server).list_databases().collect().await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(err @ AppError::HttpStatus { status, code, body, .. }) => {
            assert_eq!(*status, StatusCode::BAD_GATEWAY);
            assert!(code.is_none());
            assert_eq!(body, "upstream unavailable");
            assert!(err.is_retryable());
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_has_more_without_cursor_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/databases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "results": [database(ID_A)],
            "next_cursor": null,
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results: Vec<Result<Database, AppError>> =
        client_for(&server).list_databases().collect().await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(
        &results[1],
        Err(AppError::Decode { path, .. }) if path == "next_cursor"
    ));
}

#[tokio::test]
async fn test_malformed_item_reports_its_index() {
    let server = MockServer::start().await;
    let mut broken = database(ID_B);
    broken["properties"]["Number Property"]["number"]["format"] = json!("doubloon");
    Mock::given(method("GET"))
        .and(path("/v1/databases"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![database(ID_A), broken, database(ID_C)], None)),
        )
        .mount(&server)
        .await;

    let results: Vec<Result<Database, AppError>> =
        client_for(&server).list_databases().collect().await;

    assert_eq!(results.len(), 2);
    match &results[1] {
        Err(AppError::UnknownEnumValue { kind, value, path }) => {
            assert_eq!(kind, "NumberFormat");
            assert_eq!(value, "doubloon");
            assert!(path.starts_with("results[1].properties"), "path was {}", path);
        }
        other => panic!("expected UnknownEnumValue, got {:?}", other),
    }
}

#[tokio::test]
async fn test_nothing_is_sent_until_polled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![], None)))
        .expect(0)
        .mount(&server)
        .await;

    let stream = client_for(&server).list_databases();
    drop(stream);
}

#[tokio::test]
async fn test_raw_pagination_rejects_non_object_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![], None)))
        .expect(0)
        .mount(&server)
        .await;

    let results: Vec<_> = client_for(&server)
        .paginated_request(Method::POST, "/v1/search", true, Some(json!(["not", "an", "object"])))
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0],
        Err(AppError::Validation(ValidationError::InvalidRequestBody(_)))
    ));
}

#[tokio::test]
async fn test_raw_pagination_without_body_sends_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(vec![json!({"object": "user"})], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let envelopes: Vec<_> = client_for(&server)
        .paginated_request(Method::POST, "/v1/search", true, None)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0].results, vec![json!({"object": "user"})]);
    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, json!({}));
}
