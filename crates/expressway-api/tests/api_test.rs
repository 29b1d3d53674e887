use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use expressway_api::{create_router, AppState};
use expressway_store::FileFeatureStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const SEED: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "CT.01", "status": "operational" },
      "geometry": { "type": "LineString", "coordinates": [[105.80, 21.00], [105.90, 20.90], [106.00, 20.80]] }
    },
    {
      "type": "Feature",
      "properties": { "id": "hlhp", "name": "Ha Noi - Hai Phong", "status": "operational" },
      "geometry": { "type": "LineString", "coordinates": [[105.90, 21.00], [106.60, 20.85]] }
    }
  ]
}"#;

struct TestServer {
    _dir: TempDir,
    path: std::path::PathBuf,
    app: Router,
}

fn server() -> TestServer {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vietnam_express_way.geojson");
    std::fs::write(&path, SEED).unwrap();

    let state = Arc::new(AppState::new(Arc::new(FileFeatureStore::new(&path))));
    TestServer {
        _dir: dir,
        path,
        app: create_router(state),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn line_feature(properties: Value, coordinates: Value) -> Value {
    json!({
        "type": "Feature",
        "properties": properties,
        "geometry": { "type": "LineString", "coordinates": coordinates }
    })
}

#[tokio::test]
async fn test_health() {
    let server = server();
    let (status, body) = send(&server.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "expressway-api");
}

#[tokio::test]
async fn test_list_returns_collection() {
    let server = server();
    let (status, body) = send(&server.app, get("/api/expressways")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_by_id_and_by_legacy_name() {
    let server = server();

    let (status, body) = send(&server.app, get("/api/expressways/hlhp")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["properties"]["name"], "Ha Noi - Hai Phong");

    let (status, body) = send(&server.app, get("/api/expressways/CT.01")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["properties"]["name"], "CT.01");

    let (status, body) = send(&server.app, get("/api/expressways/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_rewrites_file() {
    let server = server();
    let feature = line_feature(
        json!({ "id": "hlhp", "name": "Ha Noi - Hai Phong", "status": "operational" }),
        json!([[105.90, 21.00], [106.20, 20.95], [106.60, 20.85]]),
    );

    let (status, body) =
        send(&server.app, post("/api/update-expressway", json!({ "feature": feature }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Expressway updated successfully");
    assert_eq!(body["featureName"], "Ha Noi - Hai Phong");
    assert_eq!(body["featureId"], "hlhp");

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&server.path).unwrap()).unwrap();
    assert_eq!(
        written["features"][1]["geometry"]["coordinates"].as_array().unwrap().len(),
        3
    );
}

#[tokio::test]
async fn test_update_legacy_entry_by_name() {
    let server = server();
    let feature = line_feature(
        json!({ "name": "CT.01" }),
        json!([[105.80, 21.00], [106.00, 20.80]]),
    );

    let (status, body) =
        send(&server.app, post("/api/update-expressway", json!({ "feature": feature }))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["featureId"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_renamed_legacy_entry_by_original_name() {
    let server = server();
    let feature = line_feature(
        json!({ "id": "ct01-new", "name": "CT.01 (realigned)", "status": "operational" }),
        json!([[105.80, 21.00], [105.95, 20.95], [106.00, 20.80]]),
    );

    let (status, body) = send(
        &server.app,
        post(
            "/api/update-expressway",
            json!({ "feature": feature, "originalName": "CT.01" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["featureId"], "ct01-new");

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&server.path).unwrap()).unwrap();
    assert_eq!(written["features"].as_array().unwrap().len(), 2);
    assert_eq!(written["features"][0]["properties"]["name"], "CT.01 (realigned)");
    assert_eq!(written["features"][0]["properties"]["id"], "ct01-new");
}

#[tokio::test]
async fn test_update_rejects_missing_feature_or_properties() {
    let server = server();

    let (status, body) = send(&server.app, post("/api/update-expressway", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid feature data");

    let no_properties = json!({
        "type": "Feature",
        "geometry": { "type": "LineString", "coordinates": [[105.8, 21.0], [106.0, 20.8]] }
    });
    let (status, _) = send(
        &server.app,
        post("/api/update-expressway", json!({ "feature": no_properties })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_rejects_out_of_range_coordinates() {
    let server = server();
    let before = std::fs::read_to_string(&server.path).unwrap();
    let feature = line_feature(
        json!({ "id": "hlhp", "name": "Ha Noi - Hai Phong" }),
        json!([[105.90, 21.00], [250.0, 20.85]]),
    );

    let (status, _) =
        send(&server.app, post("/api/update-expressway", json!({ "feature": feature }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read_to_string(&server.path).unwrap(), before);
}

#[tokio::test]
async fn test_update_unknown_feature_is_not_found() {
    let server = server();
    let feature = line_feature(
        json!({ "id": "nope", "name": "Nowhere" }),
        json!([[105.0, 20.0], [105.1, 20.1]]),
    );

    let (status, body) =
        send(&server.app, post("/api/update-expressway", json!({ "feature": feature }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Feature not found in GeoJSON");
}

#[tokio::test]
async fn test_create_then_conflict() {
    let server = server();
    let feature = line_feature(
        json!({ "id": "blt", "name": "Ben Luc - Long Thanh", "status": "construction" }),
        json!([[106.40, 10.60], [106.95, 10.75]]),
    );

    let (status, body) = send(
        &server.app,
        post("/api/expressways", json!({ "feature": feature.clone() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["featureId"], "blt");

    let (status, body) =
        send(&server.app, post("/api/expressways", json!({ "feature": feature }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (_, list) = send(&server.app, get("/api/expressways")).await;
    assert_eq!(list["features"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let server = server();
    let request = Request::builder()
        .method("POST")
        .uri("/api/update-expressway")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let (status, body) = send(&server.app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid feature data");
}
