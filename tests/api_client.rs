//! HTTP adapter tests against a mock backend

use domain_toolkit::{
    api::{DomainApi, HttpApiClient, UserApi},
    CheckRecord, ToolkitError,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn client(server: &MockServer, token: Option<&str>) -> HttpApiClient {
    HttpApiClient::new(server.url("/api"), token.map(str::to_string), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_check_availability_unwraps_data() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/domains/check")
                .query_param("domain", "fresh.io");
            then.status(200).json_body(json!({
                "data": {"available": true, "domain": "fresh.io", "price": 32.5, "currency": "USD", "period": 1}
            }));
        })
        .await;

    let availability = client(&server, None).check_availability("fresh.io").await.unwrap();
    mock.assert_async().await;
    assert!(availability.available);
    assert_eq!(availability.price, Some(32.5));
    assert_eq!(availability.period, Some(1));
}

#[tokio::test]
async fn test_suggestions_accept_bare_arrays() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/domains/suggestions/public")
                .query_param("limit", "2");
            then.status(200).json_body(json!([
                {"domain": "nova.ai", "score": 91, "category": "tech"},
                {"domain": "brightpay.co", "estimation_price": 1500}
            ]));
        })
        .await;

    let suggestions = client(&server, None).public_suggestions(2).await.unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].category.as_deref(), Some("tech"));
    assert_eq!(suggestions[1].display_price(), Some(1500.0));
}

#[tokio::test]
async fn test_user_endpoints_send_bearer_token() {
    let server = MockServer::start_async().await;
    let favorites = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/user/favorites")
                .header("authorization", "Bearer secret-token");
            then.status(200).json_body(json!({"data": [{"id": 3, "domain": "kept.com"}]}));
        })
        .await;

    let result = client(&server, Some("secret-token")).favorites().await.unwrap();
    favorites.assert_async().await;
    assert_eq!(result[0].id, "3");
    assert_eq!(result[0].domain, "kept.com");
}

#[tokio::test]
async fn test_add_and_remove_favorite() {
    let server = MockServer::start_async().await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/user/favorites")
                .json_body(json!({"domain": "shiny.io"}));
            then.status(201).json_body(json!({"id": "fav-9", "domain": "shiny.io"}));
        })
        .await;
    let remove = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/user/favorites/fav-9");
            then.status(204);
        })
        .await;

    let api = client(&server, Some("t"));
    let favorite = api.add_favorite("shiny.io").await.unwrap();
    assert_eq!(favorite.id, "fav-9");
    api.remove_favorite(&favorite.id).await.unwrap();

    add.assert_async().await;
    remove.assert_async().await;
}

#[tokio::test]
async fn test_remove_favorite_keeps_id_inside_favorites_path() {
    let server = MockServer::start_async().await;
    let checks = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/user/checks");
            then.status(204);
        })
        .await;
    let favorite = server
        .mock_async(|when, then| {
            when.method(DELETE).path_contains("/api/user/favorites/");
            then.status(204);
        })
        .await;

    let api = client(&server, Some("t"));
    api.remove_favorite("../checks").await.unwrap();

    favorite.assert_async().await;
    assert_eq!(checks.hits_async().await, 0);

    let err = api.remove_favorite("..").await.unwrap_err();
    assert!(matches!(err, ToolkitError::InvalidInput { .. }));
    assert_eq!(favorite.hits_async().await, 1);
}

#[tokio::test]
async fn test_record_check_posts_record() {
    let server = MockServer::start_async().await;
    let record_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/user/checks")
                .json_body(json!({"domain": "taken.com", "available": false}));
            then.status(201);
        })
        .await;

    let record = CheckRecord {
        domain: "taken.com".to_string(),
        available: false,
        price: None,
        currency: None,
        checked_at: None,
    };
    client(&server, Some("t")).record_check(&record).await.unwrap();
    record_mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_becomes_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/user/checks");
            then.status(401).json_body(json!({"detail": "Token expired"}));
        })
        .await;

    let err = client(&server, Some("old")).checks(5).await.unwrap_err();
    assert!(err.is_unauthorized());
    match err {
        ToolkitError::Api { message, status_code } => {
            assert_eq!(status_code, 401);
            assert_eq!(message, "Token expired");
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/domains/check");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = client(&server, None).check_availability("x.com").await.unwrap_err();
    assert!(matches!(err, ToolkitError::Parse { .. }));
}
