//! Integration tests for the label service API.
//!
//! These tests spin up a real server instance and make HTTP requests to verify
//! the complete request/response cycle.

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

use labelpress::api::{AppState, create_router};
use labelpress::config::{
    AppConfig, FileStorageConfig, ObservabilityConfig, ServerConfig, StorageBackend, StorageConfig,
};
use labelpress::domain::NumberingScheme;
use labelpress::storage::create_storage;

// ============================================================================
// Test Harness
// ============================================================================

/// Test server instance.
struct TestServer {
    addr: SocketAddr,
    client: Client,
    _temp_dir: TempDir,
}

impl TestServer {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".parse().unwrap(),
                port: 0,
                workers: 1,
            },
            storage: StorageConfig {
                backend: StorageBackend::File,
                file: FileStorageConfig {
                    data_dir: temp_dir.path().to_path_buf(),
                },
                ..Default::default()
            },
            scheme: NumberingScheme::default(),
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                log_format: "text".to_string(),
            },
        };

        let storage = create_storage(&config.storage)
            .await
            .expect("Failed to create storage");

        let state = AppState::new(Arc::new(config), storage);
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr,
            client: Client::new(),
            _temp_dir: temp_dir,
        }
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Response {
        self.client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }
}

fn label_request(token: &str) -> Value {
    json!({
        "id": token,
        "source-address": ["National Technical Library", "Technicka 6", "Praha"],
        "destination-address": ["Moravian Library", "Kounicova 65a", "Brno"]
    })
}

// ============================================================================
// Health Endpoints
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::new().await;

    let response = server.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let server = TestServer::new().await;

    let response = server.get("/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["components"]["storage"], true);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::new().await;

    let response = server.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.expect("Invalid body");
    assert!(body.contains("labelpress_up 1"));
}

// ============================================================================
// Label Endpoints
// ============================================================================

#[tokio::test]
async fn test_twoway_label_returns_pdf() {
    let server = TestServer::new().await;

    let response = server
        .post("/v1/labels/twoway", &label_request("order-1"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type")
        .to_str()
        .expect("Invalid header");
    assert_eq!(content_type, "application/pdf");

    let disposition = response
        .headers()
        .get("content-disposition")
        .expect("Missing content-disposition")
        .to_str()
        .expect("Invalid header");
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("label.pdf"));

    let body = response.bytes().await.expect("Failed to read body");
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_oneway_label_returns_pdf() {
    let server = TestServer::new().await;

    let response = server
        .post("/v1/labels/oneway", &label_request("order-2"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.bytes().await.expect("Failed to read body");
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_empty_id_is_rejected() {
    let server = TestServer::new().await;

    let response = server.post("/v1/labels/twoway", &label_request("")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn test_missing_address_is_rejected() {
    let server = TestServer::new().await;

    let request = json!({
        "id": "order-3",
        "source-address": ["National Technical Library"],
        "destination-address": []
    });
    let response = server.post("/v1/labels/twoway", &request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["code"], 3001);
    assert!(
        body["message"]
            .as_str()
            .expect("Missing message")
            .contains("destination-address")
    );
}

#[tokio::test]
async fn test_repeated_token_is_idempotent() {
    let server = TestServer::new().await;

    // Both requests succeed against the same persisted allocation; the
    // service never hands the token's sequence pair to anyone else.
    let first = server
        .post("/v1/labels/twoway", &label_request("order-4"))
        .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = server
        .post("/v1/labels/twoway", &label_request("order-4"))
        .await;
    assert_eq!(second.status(), StatusCode::OK);

    let other = server
        .post("/v1/labels/oneway", &label_request("order-5"))
        .await;
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let server = TestServer::new().await;

    let response = server.get("/v1/labels/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
