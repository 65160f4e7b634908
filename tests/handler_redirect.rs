mod common;

use affiliate_redirector::domain::mapping::reverse_key;
use affiliate_redirector::domain::store::MappingStore;
use affiliate_redirector::routes::app_router;
use axum_test::TestServer;
use regex::Regex;

fn token_from_location(location: &str) -> String {
    location
        .rsplit_once("our_param=")
        .expect("location should carry our_param")
        .1
        .to_string()
}

#[tokio::test]
async fn test_redirect_creates_forward_and_reverse_records() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server
        .get("/")
        .add_query_param("keyword", "shoes")
        .add_query_param("src", "google")
        .add_query_param("creative", "1234")
        .await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    let location = location.to_str().unwrap();
    let pattern = Regex::new(
        r"^https://affiliate-network\.com\?our_param=[A-Za-z0-9_-]{10}$",
    )
    .unwrap();
    assert!(pattern.is_match(location), "unexpected location {location}");

    let token = token_from_location(location);

    let forward = store.get("map:shoes:google:1234").await.unwrap();
    assert_eq!(forward.get("our_param"), Some(&token));

    let created_at = forward.get("created_at").expect("created_at missing");
    chrono::DateTime::parse_from_rfc3339(created_at).expect("created_at should be ISO-8601");

    let reverse = store.get(&reverse_key(&token)).await.unwrap();
    assert_eq!(reverse.get("created_at"), Some(created_at));

    let payload: serde_json::Value =
        serde_json::from_str(reverse.get("payload").unwrap()).unwrap();
    assert_eq!(payload["keyword"], "shoes");
    assert_eq!(payload["src"], "google");
    assert_eq!(payload["creative"], "1234");
}

#[tokio::test]
async fn test_redirect_reuses_existing_token() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let first = server
        .get("/")
        .add_query_param("keyword", "test")
        .add_query_param("src", "src")
        .add_query_param("creative", "1")
        .await;
    let second = server
        .get("/")
        .add_query_param("keyword", "test")
        .add_query_param("src", "src")
        .add_query_param("creative", "1")
        .await;

    assert_eq!(
        first.header("location").to_str().unwrap(),
        second.header("location").to_str().unwrap()
    );
}

#[tokio::test]
async fn test_refresh_generates_new_token_and_keeps_old_reverse() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let first = server
        .get("/")
        .add_query_param("keyword", "test")
        .add_query_param("src", "src")
        .add_query_param("creative", "1")
        .await;
    let first_token = token_from_location(first.header("location").to_str().unwrap());

    let second = server
        .get("/")
        .add_query_param("keyword", "test")
        .add_query_param("src", "src")
        .add_query_param("creative", "1")
        .add_query_param("refresh", "true")
        .await;
    let second_token = token_from_location(second.header("location").to_str().unwrap());

    assert_ne!(first_token, second_token);

    // Forward record now carries the new token.
    let forward = store.get("map:test:src:1").await.unwrap();
    assert_eq!(forward.get("our_param"), Some(&second_token));

    // The orphaned reverse record stays retrievable.
    let old = server
        .get("/retrieve_original")
        .add_header("x-api-key", common::TEST_API_KEY)
        .add_query_param("our_param", &first_token)
        .await;
    old.assert_status_ok();

    let body = old.json::<serde_json::Value>();
    assert_eq!(body["keyword"], "test");
}

#[tokio::test]
async fn test_missing_parameters_reported_individually() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server.get("/").add_query_param("creative", "1234").await;

    response.assert_status_bad_request();

    let body = response.json::<serde_json::Value>();
    let errors = body["error"]["details"]["errors"].as_array().unwrap();

    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"keyword"));
    assert!(fields.contains(&"src"));
    assert!(!fields.contains(&"creative"));

    // Validation short-circuits before any store write.
    assert!(store.get("map:::1234").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_parameter_rejected() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server
        .get("/")
        .add_query_param("keyword", "")
        .add_query_param("src", "google")
        .add_query_param("creative", "1234")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_refresh_accepts_only_literal_true() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server
        .get("/")
        .add_query_param("keyword", "shoes")
        .add_query_param("src", "google")
        .add_query_param("creative", "1234")
        .add_query_param("refresh", "yes")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_store_failure_yields_generic_500() {
    let state = common::create_failing_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server
        .get("/")
        .add_query_param("keyword", "shoes")
        .add_query_param("src", "google")
        .add_query_param("creative", "1234")
        .await;

    response.assert_status_internal_server_error();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["message"], "Internal server error");
}

#[tokio::test]
async fn test_redirect_then_retrieve_round_trip() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let redirect = server
        .get("/")
        .add_query_param("keyword", "shoes")
        .add_query_param("src", "google")
        .add_query_param("creative", "1234")
        .await;

    assert_eq!(redirect.status_code(), 302);
    let token = token_from_location(redirect.header("location").to_str().unwrap());

    let retrieved = server
        .get("/retrieve_original")
        .add_header("x-api-key", common::TEST_API_KEY)
        .add_query_param("our_param", &token)
        .await;

    retrieved.assert_status_ok();

    let body = retrieved.json::<serde_json::Value>();
    assert_eq!(body["keyword"], "shoes");
    assert_eq!(body["src"], "google");
    assert_eq!(body["creative"], "1234");
    chrono::DateTime::parse_from_rfc3339(body["created_at"].as_str().unwrap())
        .expect("created_at should be ISO-8601");
}
