//! Single-object calls and the recursive block fetch.

use notions::{
    ApiKey, AppError, BlockId, ClientConfig, CreatePageRequest, DatabaseId, NotionHttpClient,
    NotionRepository, PageId, PageParent, PropertyValue, UpdatePageRequest, ValidatedUrl,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_JSON: &str = include_str!("fixtures/page.json");
const COLUMN_LIST_JSON: &str = include_str!("fixtures/column_list.json");
const PAGE_ID: &str = "b3f1b6cb-1e4f-4d87-a0b9-e7e9d5e36f3c";
const DATABASE_ID: &str = "fff51adc-8d4e-414a-a2e3-17e69111c328";

fn client_for(server: &MockServer) -> NotionHttpClient {
    let config = ClientConfig::new(ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap())
        .unwrap()
        .with_base_url(ValidatedUrl::parse(&server.uri()).unwrap());
    NotionHttpClient::new(&config).unwrap()
}

fn page_fixture() -> Value {
    serde_json::from_str(PAGE_JSON).unwrap()
}

/// The block as the children endpoint returns it: no embedded children.
fn as_listed(block: &Value) -> Value {
    let mut block = block.clone();
    let kind = block["type"].as_str().unwrap().to_string();
    if let Some(payload) = block[&kind].as_object_mut() {
        payload.remove("children");
    }
    block
}

fn listing(results: Vec<Value>) -> Value {
    json!({"object": "list", "results": results, "next_cursor": null, "has_more": false})
}

#[tokio::test]
async fn test_get_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{}", PAGE_ID).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .get_page(&PageId::parse(PAGE_ID).unwrap())
        .await
        .unwrap();

    assert_eq!(page.title(), "Fields filled in");
    assert_eq!(serde_json::to_value(&page).unwrap(), page_fixture());
}

#[tokio::test]
async fn test_get_page_accepts_notion_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{}", PAGE_ID).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let id = PageId::parse("https://www.notion.so/acme/Fields-b3f1b6cb1e4f4d87a0b9e7e9d5e36f3c")
        .unwrap();
    assert!(client_for(&server).get_page(&id).await.is_ok());
}

#[tokio::test]
async fn test_create_page_sends_parent_and_properties() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/pages"))
        .and(body_partial_json(json!({
            "parent": {"type": "database_id", "database_id": DATABASE_ID}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreatePageRequest::new(PageParent::DatabaseId {
        database_id: DATABASE_ID.parse().unwrap(),
    })
    .with_property("Name", PropertyValue::title("Fields filled in"))
    .with_property("Number Property", PropertyValue::number(5i64));

    let page = client_for(&server).create_page(&request).await.unwrap();
    assert_eq!(page.title(), "Fields filled in");

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["properties"]["Number Property"]["number"], json!(5));
    assert_eq!(sent["properties"]["Name"]["type"], json!("title"));
    assert!(sent.get("children").is_none());
}

#[tokio::test]
async fn test_update_page_patches() {
    let server = MockServer::start().await;
    let mut archived = page_fixture();
    archived["archived"] = json!(true);
    Mock::given(method("PATCH"))
        .and(path(format!("/v1/pages/{}", PAGE_ID).as_str()))
        .and(body_partial_json(json!({"archived": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(archived))
        .expect(1)
        .mount(&server)
        .await;

    let request = UpdatePageRequest::default()
        .with_property("Select property", PropertyValue::select("bar"))
        .archive();
    let page = client_for(&server)
        .update_page(&PageId::parse(PAGE_ID).unwrap(), &request)
        .await
        .unwrap();

    assert!(page.archived);
}

#[tokio::test]
async fn test_block_tree_fills_children_depth_first() {
    let server = MockServer::start().await;
    let root: Value = serde_json::from_str(COLUMN_LIST_JSON).unwrap();
    let columns = root["column_list"]["children"].as_array().unwrap().clone();

    Mock::given(method("GET"))
        .and(path(format!("/v1/blocks/{}/children", root["id"].as_str().unwrap()).as_str()))
        .and(query_param("page_size", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing(columns.iter().map(as_listed).collect())),
        )
        .expect(1)
        .mount(&server)
        .await;
    for column in &columns {
        Mock::given(method("GET"))
            .and(path(format!("/v1/blocks/{}/children", column["id"].as_str().unwrap()).as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(listing(column["column"]["children"].as_array().unwrap().clone())),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let root_id = BlockId::parse(root["id"].as_str().unwrap()).unwrap();
    let tree = client_for(&server).block_tree(root_id).await.unwrap();

    assert_eq!(serde_json::to_value(&tree).unwrap(), Value::Array(columns));
    let order: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect();
    assert_eq!(
        order,
        vec![
            "/v1/blocks/9bc30ad4-9373-46a5-84ab-0a7845ee52e6/children",
            "/v1/blocks/1f2a3b4c-0000-4000-8000-000000000001/children",
            "/v1/blocks/1f2a3b4c-0000-4000-8000-000000000002/children",
        ]
    );
}

#[tokio::test]
async fn test_resolve_object_falls_back_to_database() {
    let server = MockServer::start().await;
    let database: Value = serde_json::from_str(include_str!("fixtures/database.json")).unwrap();
    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{}", DATABASE_ID).as_str()))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/databases/{}", DATABASE_ID).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(database))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let id = DatabaseId::parse(DATABASE_ID).unwrap();
    let object = client.resolve_object(*id.as_uuid()).await.unwrap();
    assert_eq!(object.object_type_name(), "database");
}

#[tokio::test]
async fn test_request_reports_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "object": "error",
            "status": 401,
            "code": "unauthorized",
            "message": "API token is invalid."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .request(reqwest::Method::GET, "/v1/users/me", None)
        .await
        .unwrap_err();
    match err {
        AppError::HttpStatus { status, message, .. } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(message.as_deref(), Some("API token is invalid."));
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}
