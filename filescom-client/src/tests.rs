//! Tests for the HTTP client against a mock server

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn client_for(server: &MockServer) -> FilesClient {
    let config = ClientConfig::builder()
        .api_key("secret")
        .endpoint(server.uri())
        .backoff(Duration::from_millis(1), Duration::from_millis(5))
        .per_page(2)
        .build();
    FilesClient::new(config).unwrap()
}

#[test]
fn missing_api_key_is_rejected() {
    let err = FilesClient::new(ClientConfig::default()).unwrap_err();
    assert!(matches!(err, Error::MissingApiKey));

    let config = ClientConfig::builder().api_key("  ").build();
    assert!(matches!(
        FilesClient::new(config).unwrap_err(),
        Error::MissingApiKey
    ));
}

#[test]
fn urls_encode_path_segments() {
    let config = ClientConfig::builder()
        .api_key("secret")
        .endpoint("https://app.files.com")
        .build();
    let client = FilesClient::new(config).unwrap();
    let url = client
        .url("file_actions/metadata/{id}", Some("Team Docs/q1#.pdf"))
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://app.files.com/api/rest/v1/file_actions/metadata/Team%20Docs/q1%23.pdf"
    );
}

#[tokio::test]
async fn find_sends_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/users/7"))
        .and(header("X-FilesAPI-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "username": "alice"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client.find("users/{id}", Some("7")).await.unwrap();
    assert_eq!(user["username"], "alice");
}

#[tokio::test]
async fn find_maps_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/groups/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Group Not Found",
            "http-code": 404,
            "type": "not-found/group-not-found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.find("groups/{id}", Some("99")).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Group Not Found"));
}

#[tokio::test]
async fn create_posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/v1/groups"))
        .and(body_json(json!({"name": "ops"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 12,
            "name": "ops"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let group = client
        .create("groups", None, &json!({"name": "ops"}))
        .await
        .unwrap();
    assert_eq!(group["id"], 12);
}

#[tokio::test]
async fn update_patches_object() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/rest/v1/groups/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "name": "platform"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let group = client
        .update("groups/{id}", "12", &json!({"name": "platform"}))
        .await
        .unwrap();
    assert_eq!(group["name"], "platform");
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/rest/v1/files/archive/2023"))
        .and(query_param("recursive", "true"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .delete(
            "files/{id}",
            "archive/2023",
            &vec![("recursive".to_string(), "true".to_string())],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn list_follows_cursor_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/users"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3}])))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/users"))
        .and(query_param("per_page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Files-Cursor-Next", "page2")
                .set_body_json(json!([{"id": 1}, {"id": 2}])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items = ListIter::new(&client, "users", Vec::new())
        .collect_all()
        .await
        .unwrap();
    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);
}

#[tokio::test]
async fn list_reads_legacy_cursor_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/permissions"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Files-Cursor", "next")
                .set_body_json(json!([{"id": 1}])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .list_page("permissions", &Vec::new(), None)
        .await
        .unwrap();
    assert_eq!(page.next_cursor.as_deref(), Some("next"));
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn rate_limited_request_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/site"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Acme"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let site = client.find("site", None).await.unwrap();
    assert_eq!(site["name"], "Acme");
}

#[tokio::test]
async fn rate_limit_gives_up_after_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/site"))
        .respond_with(ResponseTemplate::new(429))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.find("site", None).await.unwrap_err();
    assert!(matches!(err, Error::RateLimited { .. }));
}

#[tokio::test]
async fn long_retry_after_is_capped_by_max_backoff() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/v1/site"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "86400"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rest/v1/site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "acme"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let site = tokio::time::timeout(Duration::from_secs(5), client.find("site", None))
        .await
        .expect("retry waited for the full Retry-After")
        .unwrap();
    assert_eq!(site["name"], "acme");
}
