#![allow(clippy::unwrap_used)]
// Integration tests for `InnovaClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use innova_api::status::REDACTED;
use innova_api::{Connection, Error, InnovaClient, Payload, RetryPolicy, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, InnovaClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api/v/1", server.uri())).unwrap();
    let client = InnovaClient::with_client(reqwest::Client::new(), base_url).with_retry(
        RetryPolicy {
            attempts: 2,
            delay: Duration::from_millis(10),
        },
    );
    (server, client)
}

fn api_path(suffix: &str) -> String {
    format!("/api/v/1/{suffix}")
}

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true }))
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_command_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("power/on")))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    client.send_command("power/on", None).await.unwrap();
}

#[tokio::test]
async fn test_command_sends_form_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("set/setpoint")))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("p_temp=215"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let payload = Payload::form("p_temp", 215);
    client
        .send_command("set/setpoint", Some(&payload))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_command_sends_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("set/fan")))
        .and(header("content-type", "application/json"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let payload = Payload::Json(json!({ "value": 2 }));
    client.send_command("set/fan", Some(&payload)).await.unwrap();
}

#[tokio::test]
async fn test_command_rejected_is_not_retried() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("power/off")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "busy" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client.send_command("power/off", None).await;
    assert!(
        matches!(result, Err(Error::Rejected { ref message }) if message == "busy"),
        "expected Rejected error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_command_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("power/on")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.send_command("power/on", None).await;
    assert!(
        matches!(result, Err(Error::Status { status: 500 })),
        "expected Status error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_command_garbage_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("power/on")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let result = client.send_command("power/on", None).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Status ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "RESULT": { "ps": 1, "wm": 3, "sp": 210, "ta": 215, "fn": 1 },
            "deviceType": "002",
            "UID": "06:1A:02:0A:E4:8D"
        })))
        .mount(&server)
        .await;

    let doc = client.status().await.unwrap();
    assert!(doc.success);
    assert_eq!(doc.device_type.as_deref(), Some("002"));
    assert_eq!(
        doc.result.as_ref().and_then(|r| r.get("sp")),
        Some(&json!(210))
    );
}

#[tokio::test]
async fn test_status_without_result_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.status().await;
    assert!(matches!(result, Err(Error::Rejected { .. })));
}

#[tokio::test]
async fn test_rejected_status_masks_password() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "RESULT": { "ps": 1, "pwd": "hunter2" }
        })))
        .mount(&server)
        .await;

    let err = client.status().await.unwrap_err();
    assert!(matches!(err, Error::Rejected { .. }), "got: {err:?}");
    let text = err.to_string();
    assert!(!text.contains("hunter2"), "password in error: {text}");
    assert!(text.contains(REDACTED), "expected mask in error: {text}");
}

#[tokio::test]
async fn test_malformed_status_masks_password() {
    let (server, client) = setup().await;

    // deviceType must be a string
    Mock::given(method("GET"))
        .and(path(api_path("status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "deviceType": 2,
            "RESULT": { "ps": 1, "pwd": "hunter2" }
        })))
        .mount(&server)
        .await;

    let err = client.status().await.unwrap_err();
    let Error::Deserialization { ref body, .. } = err else {
        panic!("expected Deserialization error, got: {err:?}");
    };
    assert!(!body.contains("hunter2"), "password in body: {body}");
    assert!(!err.to_string().contains("hunter2"), "password in error: {err}");
}

// ── Retry & connection modes ────────────────────────────────────────

#[tokio::test]
async fn test_timeout_is_retried_once() {
    let server = MockServer::start().await;
    let connection = Connection::Local {
        host: server.address().to_string(),
    };
    let transport = TransportConfig {
        timeout: Duration::from_millis(200),
        retry: RetryPolicy {
            attempts: 2,
            delay: Duration::from_millis(10),
        },
    };
    let client = InnovaClient::new(&connection, &transport).unwrap();

    Mock::given(method("POST"))
        .and(path(api_path("power/on")))
        .respond_with(ok().set_delay(Duration::from_secs(2)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("power/on")))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    client.send_command("power/on", None).await.unwrap();
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let server = MockServer::start().await;
    let connection = Connection::Local {
        host: server.address().to_string(),
    };
    let transport = TransportConfig {
        timeout: Duration::from_millis(100),
        retry: RetryPolicy {
            attempts: 2,
            delay: Duration::from_millis(10),
        },
    };
    let client = InnovaClient::new(&connection, &transport).unwrap();

    Mock::given(method("GET"))
        .and(path(api_path("status")))
        .respond_with(ok().set_delay(Duration::from_secs(2)))
        .expect(2)
        .mount(&server)
        .await;

    let result = client.status().await;
    assert!(result.is_err_and(|e| e.is_transient()));
}

#[tokio::test]
async fn test_cloud_headers_are_sent() {
    let server = MockServer::start().await;
    let connection = Connection::Cloud {
        serial: "IN1212121".into(),
        uid: "06:1A:02:0A:E4:8D".into(),
    };
    let http = TransportConfig::default().build_client(&connection).unwrap();
    let base_url = Url::parse(&format!("{}/api/v/1", server.uri())).unwrap();
    let client = InnovaClient::with_client(http, base_url);

    Mock::given(method("POST"))
        .and(path(api_path("power/on")))
        .and(header("X-serial", "IN1212121"))
        .and(header("X-UID", "06:1A:02:0A:E4:8D"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    client.send_command("power/on", None).await.unwrap();
}

#[tokio::test]
async fn test_local_mode_sends_no_identity_headers() {
    let server = MockServer::start().await;
    let connection = Connection::Local {
        host: server.address().to_string(),
    };
    let client = InnovaClient::new(&connection, &TransportConfig::default()).unwrap();

    Mock::given(method("POST"))
        .and(header_exists("X-serial"))
        .respond_with(ResponseTemplate::new(400))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("power/off")))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    client.send_command("power/off", None).await.unwrap();
}
