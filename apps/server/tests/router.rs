use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use flip::domain::Feature;
use flip::domain::config::{ApiConfig, SslConfig};
use flip::kernel::config::load_config;
use flip::kernel::store::InMemoryFeatureStore;
use flip_server::Server;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn server() -> Server {
    let store = InMemoryFeatureStore::new();
    store.insert(Feature::new("F1").unwrap().with_enable(true).with_group("beta"));
    Server::builder().store(Arc::new(store)).build().unwrap()
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = server().router().oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn serves_feature_routes() {
    let (status, body) = get("/features/F1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"uid":"F1","enable":true,"group":"beta"}"#);

    let (status, body) = get("/features/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("does not exist"));
}

#[tokio::test]
async fn health_reports_feature_count() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "up");
    assert_eq!(health["features"], 1);
}

#[tokio::test]
async fn scalar_ui_is_mounted() {
    let app = Server::builder().build().unwrap().router();
    let response = app.oneshot(Request::get("/api").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn missing_certificate_fails_build() {
    let mut config = ApiConfig::default();
    config.server.ssl =
        Some(SslConfig { cert: "/nonexistent/cert.pem".into(), key: "/nonexistent/key.pem".into() });

    let err = Server::builder().config(config).build().unwrap_err();
    assert!(err.to_string().contains("SSL certificate not found"));
}

#[test]
fn shipped_config_only_carries_server_settings() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../server.toml");
    let cfg: ApiConfig = load_config(Some(path)).unwrap();
    assert_eq!(cfg.server.port, 8282);
    assert!(cfg.server.ssl.is_none());
    assert!(cfg.strategy.allowed_namespaces.is_empty());
}

#[test]
fn builder_applies_port() {
    let server = Server::builder().port(9191).build().unwrap();
    assert_eq!(server.state().config.server.port, 9191);
}
