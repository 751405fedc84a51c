use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use steam_predictor::{
    config::HarvesterConfig,
    harvester::CatalogRecord,
    model::{Classifier, ModelStore},
    predictor::{PredictionRequest, Predictor},
    server,
};
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

pub const PREDICT_URI: &str = "/api/steam/v1/predict";
pub const MODEL_URI: &str = "/api/steam/v1/model";

/// The worked example from the service contract.
pub fn sample_request() -> PredictionRequest {
    PredictionRequest {
        price: 2.99,
        initialprice: 2.99,
        languages: vec!["English".to_string()],
        genre: vec!["Indie".to_string()],
        tags: vec!["Indie".to_string(), "Action".to_string()],
    }
}

pub fn sample_body() -> Value {
    serde_json::to_value(sample_request()).unwrap()
}

/// Binary model over a small vocabulary.
/// Feature layout: price, initialprice, English, Japanese, Indie, RPG,
/// Action, Indie, Great Soundtrack
pub const BINARY_MODEL_JSON: &str = r#"{
    "classes": [0, 1],
    "class_names": ["Mixed or worse", "Mostly Positive"],
    "features": {
        "numeric": ["price", "initialprice"],
        "languages": ["English", "Japanese"],
        "genre": ["Indie", "RPG"],
        "tags": ["Action", "Indie", "Great Soundtrack"]
    },
    "booster": {
        "objective": "binary:logistic",
        "base_score": 0.6,
        "trees": [
            { "nodes": [
                { "feature": 8, "threshold": 0.5, "yes": 1, "no": 2 },
                { "leaf": -0.2 },
                { "leaf": 1.1 }
            ]},
            { "nodes": [
                { "feature": 1, "threshold": 15.0, "yes": 1, "no": 4 },
                { "feature": 3, "threshold": 0.5, "yes": 2, "no": 3 },
                { "leaf": 0.1 },
                { "leaf": 0.4 },
                { "leaf": -0.3 }
            ]},
            { "nodes": [
                { "feature": 5, "threshold": 0.5, "yes": 1, "no": 2 },
                { "leaf": 0.05 },
                { "leaf": 0.35 }
            ]}
        ]
    }
}"#;

pub const MULTICLASS_MODEL_JSON: &str = r#"{
    "classes": [0, 1, 2],
    "features": { "tags": ["Action", "Indie"] },
    "booster": {
        "objective": "multi:softprob",
        "trees": [
            { "class": 0, "nodes": [
                { "feature": 0, "threshold": 10.0, "yes": 1, "no": 2 },
                { "leaf": -0.5 },
                { "leaf": 0.8 }
            ]},
            { "class": 1, "nodes": [
                { "feature": 2, "threshold": 0.5, "yes": 1, "no": 2 },
                { "leaf": 0.0 },
                { "leaf": 0.6 }
            ]},
            { "class": 2, "nodes": [
                { "feature": 3, "threshold": 0.5, "yes": 1, "no": 2 },
                { "leaf": 0.2 },
                { "leaf": -0.4 }
            ]}
        ]
    }
}"#;

/// Writes an artifact into a fresh temp directory.
pub fn write_model(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("model.json");
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}

pub fn create_test_app(classifier: Arc<dyn Classifier>) -> Router {
    server::router(Predictor::new(ModelStore::from_classifier(classifier)))
}

pub fn create_test_app_with_store(store: ModelStore) -> Router {
    server::router(Predictor::new(store))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)))
    };
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Serves `app` on an ephemeral local port.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Harvester settings without pacing so tests run instantly.
pub fn fast_harvester_config(base_url: &str) -> HarvesterConfig {
    HarvesterConfig {
        listing_url: format!("{base_url}/api.php"),
        detail_url: format!("{base_url}/api.php"),
        max_pages: 86,
        page_delay_ms: 0,
        detail_delay_ms: 0,
        request_timeout_secs: 5,
        ..HarvesterConfig::default()
    }
}

pub fn listing_record(appid: u64) -> CatalogRecord {
    CatalogRecord::from_value(json!({
        "appid": appid,
        "name": format!("Game {appid}"),
        "positive": appid * 10,
        "negative": appid
    }))
    .unwrap()
}

pub fn detail_record(appid: u64) -> CatalogRecord {
    CatalogRecord::from_value(json!({
        "appid": appid,
        "name": format!("Game {appid}"),
        "genre": "Indie",
        "tags": {"Indie": 120, "Action": 80}
    }))
    .unwrap()
}
