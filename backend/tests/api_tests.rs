//! HTTP surface tests
//!
//! Exercise the router for requests that are answered before any database
//! access: upload validation, price validation and the health endpoint.
//! The pool is created lazily and never connects.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use price_tracker::config::{
    CatalogConfig, DatabaseConfig, ImportConfig, LoggingConfig, PricingConfig, ServerConfig,
};
use price_tracker::{create_app, AppState, Config};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

const BOUNDARY: &str = "price-tracker-test-boundary";

fn app() -> Router {
    let config = Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://localhost:1/unused".to_string(),
            max_connections: 1,
            min_connections: 0,
        },
        pricing: PricingConfig::default(),
        import: ImportConfig::default(),
        catalog: CatalogConfig::default(),
        logging: LoggingConfig::default(),
    };
    let db = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database.url)
        .unwrap();

    create_app(AppState {
        db,
        config: Arc::new(config),
    })
}

fn multipart_request(field: &str, filename: &str, contents: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/price-mappings/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_service_health_reports_unreachable_store() {
    let response = app()
        .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["service"], "price-tracker");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["database"], "unreachable");
}

#[tokio::test]
async fn test_import_without_file_field() {
    let response = app()
        .oneshot(multipart_request("attachment", "prices.csv", b"sku_id\n"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "IMPORT_ERROR");
    assert_eq!(body["error"]["message"], "No file uploaded");
    assert_eq!(body["error"]["field"], "file");
}

#[tokio::test]
async fn test_import_unsupported_extension() {
    let response = app()
        .oneshot(multipart_request("file", "prices.pdf", b"%PDF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "IMPORT_ERROR");
}

#[tokio::test]
async fn test_import_empty_file() {
    let response = app()
        .oneshot(multipart_request("file", "prices.xlsx", b""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["message"], "Uploaded file is empty");
}

#[tokio::test]
async fn test_import_unreadable_workbook() {
    let response = app()
        .oneshot(multipart_request("file", "prices.xlsx", b"not a workbook"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "IMPORT_ERROR");
}

#[tokio::test]
async fn test_upsert_rejects_struck_price_before_lookup() {
    let payload = json!({
        "sku_id": Uuid::new_v4(),
        "vendor_id": Uuid::new_v4(),
        "location_id": Uuid::new_v4(),
        "price": "20.00",
        "struck_price": "25.00"
    });

    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/price-mappings")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "struck_price");
    assert_eq!(body["error"]["message"], "Struck price must be lower than price");
}
