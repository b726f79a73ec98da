use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use delivery_dashboard::clients::{Geocoder, GeocodingError};
use delivery_dashboard::config::{DataBackend, EnvironmentConfig};
use delivery_dashboard::models::SearchResult;
use delivery_dashboard::repositories::{GatewayOp, InMemoryGateway};
use delivery_dashboard::{create_app, AppState};

const BOUNDARY: &str = "dashboard-test-boundary";

struct FakeGeocoder {
    calls: AtomicUsize,
    results: Vec<SearchResult>,
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search(&self, _text: &str) -> Result<Vec<SearchResult>, GeocodingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }
}

struct TestApp {
    app: Router,
    gateway: Arc<InMemoryGateway>,
    geocoder: Arc<FakeGeocoder>,
}

// Función helper para crear la app de test
fn create_test_app() -> TestApp {
    let config = EnvironmentConfig {
        data_backend: DataBackend::Memory,
        ..Default::default()
    };
    let gateway = Arc::new(InMemoryGateway::new());
    let geocoder = Arc::new(FakeGeocoder {
        calls: AtomicUsize::new(0),
        results: vec![
            SearchResult {
                lat: "34.7324".to_string(),
                lon: "36.7137".to_string(),
                display_name: "Homs, Syria".to_string(),
            },
            SearchResult {
                lat: "not-a-number".to_string(),
                lon: "36.0".to_string(),
                display_name: "Broken".to_string(),
            },
        ],
    });
    let app = create_app(AppState::new(config, gateway.clone(), geocoder.clone()));
    TestApp { app, gateway, geocoder }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart(method: &str, uri: &str, fields: &[(&str, &str)], image: Option<&[u8]>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let test = create_test_app();
    let (status, body) = send(&test.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_active_orders_overlay_skips_invalid_rows() {
    let test = create_test_app();
    test.gateway.seed(
        "delv_orders",
        vec![
            json!({ "id": 1, "status": "new", "start_point": "33.5,36.3", "end_point": "33.6,36.4" }),
            json!({ "id": 2, "status": "new", "start_point": "33.5,36.3", "end_point": "NaN,36.4" }),
            json!({ "id": 3, "status": "finish", "start_point": "33.5,36.3", "end_point": "33.7,36.5" }),
        ],
    );

    let (status, body) = send(&test.app, post_json("/api/map/active-orders", json!({ "enabled": true }))).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["show_active_orders"], true);
    assert_eq!(data["loading"], false);
    assert_eq!(data["scene"]["segments"].as_array().unwrap().len(), 1);
    assert_eq!(data["scene"]["markers"][0]["label"], "1");
    assert_eq!(data["scene"]["current_location"]["label"], "Current location");
    assert_eq!(data["rejected"].as_array().unwrap().len(), 1);
    assert_eq!(data["rejected"][0]["index"], 1);

    test.gateway.clear_calls();
    let (status, body) = send(&test.app, post_json("/api/map/active-orders", json!({ "enabled": false }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["scene"]["segments"].as_array().unwrap().is_empty());
    assert_eq!(test.gateway.calls_of(GatewayOp::Select), 0);
}

#[tokio::test]
async fn test_route_fetch_failure_returns_bad_gateway() {
    let test = create_test_app();
    test.gateway.fail_on(GatewayOp::Select);

    let (status, body) = send(&test.app, post_json("/api/map/active-orders", json!({ "enabled": true }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "GATEWAY_ERROR");

    let (_, body) = send(&test.app, get("/api/map/scene")).await;
    assert_eq!(body["data"]["loading"], false);
    assert_eq!(body["data"]["notice"]["level"], "error");
}

#[tokio::test]
async fn test_recenter_is_idempotent() {
    let test = create_test_app();
    let request = || post_json("/api/map/center", json!({ "lat": 35.0, "lon": 38.0 }));

    let (_, first) = send(&test.app, request()).await;
    let (status, second) = send(&test.app, request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(second["data"]["scene"]["zoom"], 13);
    assert_eq!(second["data"]["scene"]["center"]["lat"], 35.0);
}

#[tokio::test]
async fn test_empty_search_never_calls_geocoder() {
    let test = create_test_app();
    let (status, body) = send(&test.app, post_json("/api/geocoding/search", json!({ "text": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(test.geocoder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_search_then_select_moves_center() {
    let test = create_test_app();
    let (status, body) = send(&test.app, post_json("/api/geocoding/search", json!({ "text": "Homs" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["candidates"].as_array().unwrap().len(), 2);

    // candidato con latitud no numérica: el centro no se mueve
    let (status, _) = send(&test.app, post_json("/api/geocoding/select", json!({ "index": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, scene) = send(&test.app, get("/api/map/scene")).await;
    assert_eq!(scene["data"]["scene"]["center"]["lat"], 33.5138);

    let (status, body) = send(&test.app, post_json("/api/geocoding/select", json!({ "index": 0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["scene"]["center"]["lat"], 34.7324);
    assert!(body["data"]["candidates"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_order_counts_for_today() {
    let test = create_test_app();
    let now = chrono::Utc::now().timestamp_millis();
    let forty_days_ago = now - 40 * 24 * 60 * 60 * 1000;
    test.gateway.seed(
        "delv_orders",
        vec![
            json!({ "id": 1, "status": "new", "start_time": now }),
            json!({ "id": 2, "status": "finish", "start_time": now }),
            json!({ "id": 3, "status": "end", "start_time": now }),
            json!({ "id": 4, "status": "cancel", "start_time": now }),
            json!({ "id": 5, "status": "new", "start_time": forty_days_ago }),
        ],
    );

    let (status, body) = send(&test.app, get("/api/orders/counts?preset=today")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["counts"]["incomplete"], 1);
    assert_eq!(body["data"]["counts"]["completed"], 2);
    assert_eq!(body["data"]["counts"]["canceled"], 1);
}

#[tokio::test]
async fn test_count_failure_keeps_previous_summary() {
    let test = create_test_app();
    let now = chrono::Utc::now().timestamp_millis();
    test.gateway
        .seed("delv_orders", vec![json!({ "id": 1, "status": "new", "start_time": now })]);

    let (status, body) = send(&test.app, get("/api/dashboard")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["active_preset"]["kind"], "today");
    assert_eq!(body["data"]["counts"]["incomplete"], 1);

    test.gateway.fail_on(GatewayOp::Count);
    let (status, _) = send(&test.app, get("/api/orders/counts?preset=last_week")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, body) = send(&test.app, get("/api/dashboard")).await;
    assert_eq!(body["data"]["counts"]["incomplete"], 1);
    assert_eq!(body["data"]["active_preset"]["kind"], "last_week");
    assert_eq!(body["data"]["loading"], false);
    assert!(body["data"]["error"].is_string());
}

#[tokio::test]
async fn test_malformed_custom_range_rejected() {
    let test = create_test_app();
    let (status, _) = send(&test.app, get("/api/orders/counts?start_date=2024-13-01&end_date=2024-12-31")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(test.gateway.calls_of(GatewayOp::Count), 0);
}

#[tokio::test]
async fn test_last_representable_end_date_rejected() {
    let test = create_test_app();
    let (status, body) = send(
        &test.app,
        get("/api/orders/counts?start_date=2024-01-01&end_date=%2B262142-12-31"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(test.gateway.calls_of(GatewayOp::Count), 0);
}

#[tokio::test]
async fn test_undecodable_order_row_keeps_original_indices() {
    let test = create_test_app();
    test.gateway.seed(
        "delv_orders",
        vec![
            json!({ "id": 1, "status": "new", "start_point": 33.5, "end_point": "33.6,36.4" }),
            json!({ "id": 2, "status": "new", "start_point": "bad", "end_point": "33.6,36.4" }),
            json!({ "id": 3, "status": "new", "start_point": "33.5,36.3", "end_point": "33.6,36.4" }),
        ],
    );

    let (status, body) = send(&test.app, post_json("/api/map/active-orders", json!({ "enabled": true }))).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["scene"]["segments"].as_array().unwrap().len(), 1);
    assert_eq!(data["rejected"][0]["index"], 0);
    assert_eq!(data["rejected"][0]["endpoint"], "row");
    assert_eq!(data["rejected"][1]["index"], 1);
    assert_eq!(data["rejected"][1]["endpoint"], "start");
}

#[tokio::test]
async fn test_create_listing_requires_image() {
    let test = create_test_app();
    let (status, body) = send(&test.app, multipart("POST", "/api/listings", &[("name", "Promo")], None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please select an image for the listing");
    assert_eq!(test.gateway.calls_of(GatewayOp::UploadObject), 0);
    assert_eq!(test.gateway.calls_of(GatewayOp::Insert), 0);
}

#[tokio::test]
async fn test_create_listing_uploads_then_inserts() {
    let test = create_test_app();
    let request = multipart(
        "POST",
        "/api/listings",
        &[("name", "Promo"), ("notes", "Weekend offer")],
        Some(b"\x89PNG fake"),
    );
    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["type"], "ads");
    assert_eq!(body["data"]["fileType"], "image/png");
    let stored = body["data"]["storedFileName"].as_str().unwrap().to_string();
    assert!(stored.ends_with("_photo.png"));
    assert_eq!(
        body["data"]["image_url"],
        format!("memory://images/{}", stored)
    );
    assert_eq!(test.gateway.object("images", &stored).unwrap(), b"\x89PNG fake".to_vec());
    assert_eq!(test.gateway.rows("services").len(), 1);
}

#[tokio::test]
async fn test_failed_insert_removes_uploaded_image() {
    let test = create_test_app();
    test.gateway.fail_on(GatewayOp::Insert);

    let request = multipart("POST", "/api/listings", &[("name", "Promo")], Some(b"img"));
    let (status, _) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(test.gateway.calls_of(GatewayOp::UploadObject), 1);
    assert_eq!(test.gateway.calls_of(GatewayOp::RemoveObject), 1);
    assert_eq!(test.gateway.object_count(), 0);
}

#[tokio::test]
async fn test_update_listing_keeps_image_when_none_given() {
    let test = create_test_app();
    test.gateway.seed(
        "services",
        vec![json!({
            "id": 7, "type": "ads", "name": "Old", "fileType": "image/jpeg",
            "storedFileName": "1_old.jpg"
        })],
    );

    let request = multipart("PUT", "/api/listings/7", &[("name", "New")], None);
    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "New");
    assert_eq!(body["data"]["storedFileName"], "1_old.jpg");
    assert_eq!(test.gateway.calls_of(GatewayOp::UploadObject), 0);
    assert_eq!(test.gateway.rows("services")[0]["name"], "New");
}

#[tokio::test]
async fn test_delete_listing_requires_confirmation() {
    let test = create_test_app();
    test.gateway.seed(
        "services",
        vec![json!({ "id": 3, "type": "ads", "name": "Promo", "storedFileName": "1_a.png" })],
    );

    let delete = |uri: &str| Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap();

    let (status, body) = send(&test.app, delete("/api/listings/3")).await;
    assert_eq!(status, StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(body["code"], "CONFIRMATION_REQUIRED");
    assert_eq!(test.gateway.calls_of(GatewayOp::Delete), 0);

    let (status, _) = send(&test.app, delete("/api/listings/3?confirm=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(test.gateway.rows("services").is_empty());
}

#[tokio::test]
async fn test_listing_detail_not_found() {
    let test = create_test_app();
    let (status, body) = send(&test.app, get("/api/listings/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_captain_directory_filters_locally() {
    let test = create_test_app();
    test.gateway.seed(
        "users",
        vec![
            json!({ "id": 1, "user_name": "Mahmoud", "phone": "0991234567" }),
            json!({ "id": 2, "user_name": "Ali", "phone": "0557654321" }),
        ],
    );

    let (status, body) = send(&test.app, get("/api/captains?q=ALI")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["captains"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["captains"][0]["name"], "Ali");

    test.gateway.clear_calls();
    let (_, body) = send(&test.app, get("/api/captains/filter?q=099")).await;
    assert_eq!(body["data"]["captains"][0]["id"], 1);
    assert!(test.gateway.calls().is_empty());
}
