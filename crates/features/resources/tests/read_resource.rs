use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use flip_domain::Feature;
use flip_json::FeatureCodec;
use flip_kernel::server::ApiState;
use flip_kernel::store::InMemoryFeatureStore;
use flip_strategy::{StrategyCatalog, StrategyLoader};
use flip_resources::{ErrorBody, FeatureDocument, features_router};
use std::sync::Arc;
use tower::ServiceExt;

fn store() -> InMemoryFeatureStore {
    let store = InMemoryFeatureStore::new();
    for uid in ["F1", "F2", "F3"] {
        store.insert(Feature::new(uid).unwrap());
    }
    store.insert(Feature::new("F4").unwrap().with_enable(true).with_permissions(["ADMIN"]));
    store
}

fn app() -> Router {
    let state = ApiState::builder().store(Arc::new(store())).build().unwrap();
    let (router, _api) = features_router().with_state(state).split_for_parts();
    router
}

async fn get(uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app().oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn unknown_feature_is_not_found() {
    let (status, content_type, body) = get("/features/F_DOESNOTEXIST").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert!(body.contains("does not exist"));

    let error: ErrorBody = serde_json::from_str(&body).unwrap();
    assert_eq!(error.uid.as_deref(), Some("F_DOESNOTEXIST"));
    assert_eq!(error.error, "Feature 'F_DOESNOTEXIST' does not exist");
}

#[tokio::test]
async fn known_feature_is_served_as_codec_document() {
    let (status, content_type, body) = get("/features/F4").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, r#"{"uid":"F4","enable":true,"permissions":["ADMIN"]}"#);

    let codec = FeatureCodec::new(StrategyLoader::new(StrategyCatalog::with_builtins()));
    let feature = codec.parse_feature(&body).unwrap();
    assert!(feature.is_enabled());
    assert!(feature.permissions().contains("ADMIN"));
    assert_eq!(feature.permissions().len(), 1);
}

#[tokio::test]
async fn listing_returns_every_feature_in_uid_order() {
    let (status, _, body) = get("/features").await;
    assert_eq!(status, StatusCode::OK);

    let documents: Vec<FeatureDocument> = serde_json::from_str(&body).unwrap();
    let uids: Vec<_> = documents.iter().map(|d| d.uid.as_str()).collect();
    assert_eq!(uids, ["F1", "F2", "F3", "F4"]);
    assert!(documents[0].description.is_none());
    assert_eq!(documents[3].permissions, ["ADMIN"]);
}

#[tokio::test]
async fn documents_reserialize_without_absent_fields() {
    let (_, _, body) = get("/features/F4").await;
    let document: FeatureDocument = serde_json::from_str(&body).unwrap();
    let reserialized = serde_json::to_string(&document).unwrap();

    assert_eq!(reserialized, body);
    assert!(!reserialized.contains("null"));
    assert!(!reserialized.contains("flippingStrategy"));
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let first = get("/features/F1").await;
    let second = get("/features/F1").await;
    assert_eq!(first, second);
}
