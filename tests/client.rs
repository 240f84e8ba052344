//! Dispatcher behaviour against a mock Intercom API.

use std::time::Duration;

use intercom::{Config, IntercomClient, IntercomError};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APP_ID: &str = "app_id_123";
const API_KEY: &str = "secret_key_456";

fn client_for(server: &MockServer) -> IntercomClient {
    let config = Config::new(APP_ID, API_KEY).with_api_endpoint(server.uri());
    IntercomClient::new(&config).expect("client should build")
}

#[tokio::test]
async fn sends_basic_auth_and_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(basic_auth(APP_ID, API_KEY))
        .and(header("accept", "application/json"))
        .and(header(
            "user-agent",
            concat!("intercom-rust/", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "users": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value = assert_ok!(client.call(Method::GET, "users", None).await);
    assert_eq!(value, json!({ "users": [] }));
}

#[tokio::test]
async fn get_params_become_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("email", "ben@example.com"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = json!({ "email": "ben@example.com", "user_id": null, "page": 2 });
    let value = assert_ok!(client.call(Method::GET, "users", Some(params)).await);
    assert_eq!(value["ok"], true);

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.query().unwrap_or_default().contains("user_id"));
}

#[tokio::test]
async fn write_params_are_sent_as_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/tags"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "VIP", "tag_or_untag": "tag" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = json!({ "name": "VIP", "tag_or_untag": "tag" });
    let value = assert_ok!(client.call(Method::PUT, "tags", Some(body)).await);
    assert_eq!(value["id"], "1");
}

#[tokio::test]
async fn blank_body_decodes_to_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(202).set_body_string("  \n"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value = assert_ok!(client.call(Method::POST, "events", Some(json!({}))).await);
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn invalid_json_is_a_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.call(Method::GET, "users", None).await);
    assert!(matches!(err, IntercomError::Serialization(_)));
}

async fn error_for_status(code: u16, body: &str) -> IntercomError {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(code).set_body_string(body))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .call(Method::GET, "users", None)
        .await
        .expect_err("non-success status should fail")
}

#[tokio::test]
async fn maps_401_to_authentication() {
    let err = error_for_status(401, "").await;
    assert!(matches!(err, IntercomError::Authentication { .. }));
    assert!(err.to_string().contains("Invalid API key/username provided."));
}

#[tokio::test]
async fn maps_404_to_resource_not_found() {
    let err = error_for_status(404, r#"{"error":"User Not Found"}"#).await;
    assert!(err.is_not_found());
    assert_eq!(err.body(), Some(r#"{"error":"User Not Found"}"#));
}

#[tokio::test]
async fn maps_client_and_server_errors_to_server() {
    for code in [400u16, 402, 403, 422, 429, 500] {
        let err = error_for_status(code, "").await;
        match err {
            IntercomError::Server { status, .. } => assert_eq!(status.as_u16(), code),
            other => panic!("expected Server for {}, got {:?}", code, other),
        }
    }
}

#[tokio::test]
async fn maps_gateway_errors() {
    assert!(matches!(
        error_for_status(502, "").await,
        IntercomError::BadGateway { .. }
    ));

    for code in [503u16, 504] {
        match error_for_status(code, "").await {
            IntercomError::ServiceUnavailable { status, .. } => {
                assert_eq!(status.as_u16(), code)
            }
            other => panic!("expected ServiceUnavailable for {}, got {:?}", code, other),
        }
    }
}

#[tokio::test]
async fn unmapped_status_keeps_raw_body() {
    let err = error_for_status(418, "teapot").await;
    assert_eq!(err.status(), Some(StatusCode::IM_A_TEAPOT));
    assert_eq!(err.body(), Some("teapot"));
}

#[tokio::test]
async fn error_bodies_never_contain_the_api_key() {
    let err = error_for_status(500, &format!("bad key {}", API_KEY)).await;
    let body = err.body().unwrap();
    assert!(!body.contains(API_KEY));
    assert!(body.contains("[REDACTED]"));
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = Config::new(APP_ID, API_KEY)
        .with_api_endpoint(server.uri())
        .with_timeout(Duration::from_millis(100));
    let client = IntercomClient::new(&config).unwrap();

    let err = assert_err!(client.call(Method::GET, "users", None).await);
    assert!(matches!(err, IntercomError::Timeout { .. }));
}

#[tokio::test]
async fn stalled_body_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{",
            )
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let config = Config::new(APP_ID, API_KEY)
        .with_api_endpoint(format!("http://{}/", addr))
        .with_timeout(Duration::from_millis(300));
    let client = IntercomClient::new(&config).unwrap();

    let err = assert_err!(client.call(Method::GET, "users", None).await);
    assert!(matches!(err, IntercomError::Timeout { .. }), "got {:?}", err);
}

#[tokio::test]
async fn connection_test_reports_bad_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.test_connection().await);
    assert!(matches!(err, IntercomError::ConnectionTest { .. }));
    assert!(err.to_string().contains("INTERCOM_API_KEY"));
}

#[tokio::test]
async fn connection_test_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("per_page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "users": [], "total_count": 0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = assert_ok!(client.test_connection().await);
    assert_eq!(page.total_count, Some(0));
}

#[test]
fn rejects_invalid_endpoint() {
    let config = Config::new(APP_ID, API_KEY).with_api_endpoint("not a url");
    let err = IntercomClient::new(&config).unwrap_err();
    assert!(matches!(err, IntercomError::Config(_)));
}
