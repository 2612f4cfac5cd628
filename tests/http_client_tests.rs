//! Integration tests for the request executor.
//!
//! These tests run the client against a local mock server and verify the
//! headers it sends, how responses are classified, and cancellation.

use std::time::Duration;

use serde_json::{json, Value};
use shopify_admin::clients::{
    ClassifiedError, HttpClient, HttpError, HttpMethod, HttpRequest, MAX_ERROR_BODY_BYTES,
};
use shopify_admin::{AccessToken, ClientConfig, ShopUrl};
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer) -> HttpClient {
    let config = ClientConfig::builder()
        .shop_url(ShopUrl::new(server.uri()).unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .build()
        .unwrap();
    HttpClient::from_config(&config).unwrap()
}

// ============================================================================
// Request Building
// ============================================================================

#[tokio::test]
async fn test_get_sends_auth_and_user_agent_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/shop.json"))
        .and(header("X-Shopify-Access-Token", "test-token"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shop": {"id": 1}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client
        .request::<Value>(HttpRequest::get("/admin/shop.json"), &CancellationToken::new())
        .await;

    let response = assert_ok!(response);
    assert_eq!(response.response.code, 200);
    assert_eq!(response.data.unwrap()["shop"]["id"], 1);
}

#[tokio::test]
async fn test_custom_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "my-app/1.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .shop_url(ShopUrl::new(server.uri()).unwrap())
        .access_token(AccessToken::new("test-token").unwrap())
        .user_agent("my-app/1.0")
        .build()
        .unwrap();
    let client = HttpClient::from_config(&config).unwrap();

    let response = client
        .request::<Value>(HttpRequest::get("/admin/shop.json"), &CancellationToken::new())
        .await;
    assert_ok!(response);
}

#[tokio::test]
async fn test_post_sends_json_body_with_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/checkouts.json"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({"checkout": {"email": "a@example.com"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"checkout": {"token": "t1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Post, "/admin/checkouts.json")
        .body(json!({"checkout": {"email": "a@example.com"}}))
        .build()
        .unwrap();

    let response = client.request::<Value>(request, &CancellationToken::new()).await;

    let response = assert_ok!(response);
    assert_eq!(response.response.code, 201);
}

#[tokio::test]
async fn test_post_without_body_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest {
        http_method: HttpMethod::Post,
        path: "/admin/checkouts.json".to_string(),
        body: None,
    };

    let result = client.request::<Value>(request, &CancellationToken::new()).await;
    assert!(matches!(result, Err(HttpError::InvalidRequest(_))));
}

// ============================================================================
// Response Handling
// ============================================================================

#[tokio::test]
async fn test_accepted_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", "/admin/poll/1")
                .insert_header("Retry-After", "2"),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client
        .request::<Value>(HttpRequest::get("/admin/x.json"), &CancellationToken::new())
        .await;

    let response = assert_ok!(response);
    assert!(response.response.is_accepted());
    assert_eq!(response.response.location.as_deref(), Some("/admin/poll/1"));
    assert_eq!(response.response.retry_after, Some(2));
    assert!(response.data.is_none());
}

#[tokio::test]
async fn test_forbidden_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": {"email": ["is invalid"]}
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client
        .request::<Value>(HttpRequest::get("/admin/x.json"), &CancellationToken::new())
        .await;

    let error = assert_err!(result);
    assert!(matches!(error, HttpError::Forbidden { .. }));
    assert_eq!(error.response().map(|r| r.code), Some(403));
}

#[tokio::test]
async fn test_unprocessable_entity_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/checkouts/abc.json"))
        .respond_with(
            ResponseTemplate::new(422)
                .insert_header("X-Request-Id", "req-123")
                .set_body_json(json!({
                    "errors": {
                        "shipping_address": {
                            "zip": [{"code": "blank", "message": "can't be blank", "options": {}}]
                        }
                    }
                })),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Put, "/admin/checkouts/abc.json")
        .body(json!({"checkout": {}}))
        .build()
        .unwrap();

    let result = client.request::<Value>(request, &CancellationToken::new()).await;

    match assert_err!(result) {
        HttpError::Response(e) => {
            assert_eq!(e.code, 422);
            assert_eq!(e.error_reference(), Some("req-123"));
            assert_eq!(e.to_string(), "shipping_address: zip can't be blank");
        }
        other => panic!("Expected Response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_body_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client
        .request::<Value>(HttpRequest::get("/admin/x.json"), &CancellationToken::new())
        .await;

    let error = assert_err!(result);
    assert!(matches!(
        error.classified(),
        Some(ClassifiedError::Generic { .. })
    ));
    assert_eq!(error.response().map(|r| r.code), Some(500));
}

#[tokio::test]
async fn test_unrecognized_error_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"errors": {"base": 7}})))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client
        .request::<Value>(HttpRequest::get("/admin/x.json"), &CancellationToken::new())
        .await;

    match assert_err!(result) {
        HttpError::UnrecognizedErrorShape { source, response } => {
            assert_eq!(source.key, "base");
            assert_eq!(response.code, 400);
        }
        other => panic!("Expected UnrecognizedErrorShape, got {other:?}"),
    }
}

#[tokio::test]
async fn test_oversized_error_body_is_truncated() {
    let server = MockServer::start().await;
    let padding = "x".repeat(MAX_ERROR_BODY_BYTES * 2);
    Mock::given(method("GET"))
        .and(path("/admin/big.json"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": {"shipping_address": {"zip": [{"code": "blank", "message": padding}]}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/shop.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shop": {"id": 1}})))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let cancel = CancellationToken::new();
    let result = client
        .request::<Value>(HttpRequest::get("/admin/big.json"), &cancel)
        .await;

    // The cut-off JSON no longer decodes, so nothing specific is reported.
    let error = assert_err!(result);
    assert!(matches!(
        error.classified(),
        Some(ClassifiedError::Generic { .. })
    ));
    assert_eq!(error.response().map(|r| r.code), Some(500));

    let response = client
        .request::<Value>(HttpRequest::get("/admin/shop.json"), &cancel)
        .await;
    assert_ok!(response);
}

#[tokio::test]
async fn test_empty_success_body_has_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client
        .request::<Value>(HttpRequest::get("/admin/x.json"), &CancellationToken::new())
        .await;

    let response = assert_ok!(response);
    assert!(response.data.is_none());
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client
        .request::<Value>(HttpRequest::get("/admin/x.json"), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(HttpError::Decode(_))));
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancelled_token_fails_without_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = client
        .request::<Value>(HttpRequest::get("/admin/x.json"), &cancel)
        .await;

    let error = assert_err!(result);
    assert!(error.is_cancelled());
}

#[tokio::test]
async fn test_cancellation_interrupts_in_flight_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let result = client
        .request::<Value>(HttpRequest::get("/admin/slow.json"), &cancel)
        .await;

    assert!(matches!(result, Err(HttpError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(10));
}
