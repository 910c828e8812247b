//! # Feature Read Resource
//!
//! Read-only HTTP access to the feature store:
//!
//! * `GET /features` returns every feature as a JSON array.
//! * `GET /features/{uid}` returns one feature document, or `404` with
//!   `{"error":"Feature '<uid>' does not exist","uid":"<uid>"}`.
//!
//! Bodies are produced by [`flip_json`], so they are byte-identical to what the
//! codec emits anywhere else.

mod error;
mod features;
mod model;

pub use crate::error::{ResourceError, ResourceErrorExt};
pub use crate::model::{ErrorBody, FeatureDocument, StrategyDocument};

use flip_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes of the feature read resource, ready to merge into the application router.
pub fn features_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(features::list_features))
        .routes(routes!(features::get_feature))
}
