//! HTTP backend behavior against a local mock of the REST search endpoint.

use httpmock::MockServer;
use serde_json::json;

use quicksearch::backend::http::HttpSearchBackend;
use quicksearch::backend::SearchBackend;
use quicksearch::config::HttpConfig;
use quicksearch::error::SearchError;
use quicksearch::models::{ResourceType, SearchMode};

fn http_config(base_url: String, token: Option<&str>) -> HttpConfig {
    HttpConfig {
        base_url,
        timeout_secs: 5,
        token: token.map(str::to_string),
    }
}

#[tokio::test]
async fn test_search_sends_expected_parameters_and_decodes_response() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/resource/search")
                .query_param("q", "cat")
                .query_param("mode", "prefix")
                .query_param("types", r#"["collection","folder"]"#)
                .query_param("limit", "10");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "collection": [{"_id": "c1", "name": "Cat scans"}],
                    "folder": [{"_id": "f1", "name": "Cat pictures"}]
                }));
        })
        .await;

    let backend = HttpSearchBackend::new(&http_config(server.base_url(), None))?;
    let response = backend
        .search(
            "cat",
            SearchMode::Prefix,
            &[ResourceType::Collection, ResourceType::Folder],
            10,
        )
        .await?;

    mock.assert_async().await;
    assert_eq!(response.len(), 2);
    assert_eq!(response["collection"][0].id, "c1");
    assert_eq!(response["folder"][0].name.as_deref(), Some("Cat pictures"));
    Ok(())
}

#[tokio::test]
async fn test_token_travels_as_header() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/resource/search")
                .header("Girder-Token", "secret-token");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({}));
        })
        .await;

    let backend = HttpSearchBackend::new(&http_config(server.base_url(), Some("secret-token")))?;
    let response = backend
        .search("cat", SearchMode::Prefix, &[ResourceType::Item], 10)
        .await?;

    mock.assert_async().await;
    assert!(response.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_maps_to_status_error() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("/resource/search");
            then.status(500).body("upstream exploded");
        })
        .await;

    let backend = HttpSearchBackend::new(&http_config(server.base_url(), None))?;
    let err = backend
        .search("cat", SearchMode::Prefix, &[ResourceType::Item], 10)
        .await
        .unwrap_err();

    match err {
        SearchError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected a status error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode_error() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("/resource/search");
            then.status(200)
                .header("content-type", "application/json")
                .body("not json at all");
        })
        .await;

    let backend = HttpSearchBackend::new(&http_config(server.base_url(), None))?;
    let err = backend
        .search("cat", SearchMode::Prefix, &[ResourceType::Item], 10)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Decode(_)));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_maps_to_network_error() -> anyhow::Result<()> {
    // Port 1 is reserved and closed; the connection is refused immediately.
    let backend = HttpSearchBackend::new(&http_config("http://127.0.0.1:1".to_string(), None))?;
    let err = backend
        .search("cat", SearchMode::Prefix, &[ResourceType::Item], 10)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Network(_)));
    Ok(())
}
