use crate::error::ResourceError;
use crate::model::{ErrorBody, FeatureDocument};
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use flip_derive::api_handler;
use flip_domain::constants::FEATURES_TAG;
use flip_json::{feature_to_json, features_to_json};
use flip_kernel::store::FeatureStore;
use std::sync::Arc;

fn json_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

#[api_handler(
    get,
    path = "/features",
    responses(
        (status = OK, description = "Every feature, ordered by uid", body = [FeatureDocument]),
        (status = INTERNAL_SERVER_ERROR, description = "Store or codec failure", body = ErrorBody),
    ),
    tag = FEATURES_TAG,
)]
pub(crate) async fn list_features(
    State(store): State<Arc<dyn FeatureStore>>,
) -> Result<Response, ResourceError> {
    let features = store.find_all()?;
    Ok(json_response(features_to_json(Some(features.as_slice()))?))
}

#[api_handler(
    get,
    path = "/features/{uid}",
    params(("uid" = String, Path, description = "Feature identifier")),
    responses(
        (status = OK, description = "Feature document", body = FeatureDocument),
        (status = NOT_FOUND, description = "Feature does not exist", body = ErrorBody),
    ),
    tag = FEATURES_TAG,
)]
pub(crate) async fn get_feature(
    State(store): State<Arc<dyn FeatureStore>>,
    Path(uid): Path<String>,
) -> Result<Response, ResourceError> {
    let feature = store.find_by_id(&uid)?;
    tracing::debug!(uid = %uid, "Serving feature");
    Ok(json_response(feature_to_json(&feature)?))
}
