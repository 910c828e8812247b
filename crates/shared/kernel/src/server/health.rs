use super::ApiState;
use axum::extract::State;
use axum::http::header;
use axum::{Json, response::IntoResponse};
use flip_derive::{api_handler, api_model};
use flip_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;

#[api_model]
/// Health check response
pub(super) struct HealthResponse {
    /// `up`, or `degraded` when the feature store cannot be listed
    status: String,
    /// Server version
    version: String,
    /// Uptime in seconds
    uptime: u64,
    /// Number of features currently served
    features: usize,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Healthcheck endpoint", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let (status, features) = match state.store.count() {
        Ok(count) => ("up", count),
        Err(err) => {
            tracing::warn!(error = %err, "Feature store unavailable during health check");
            ("degraded", 0)
        },
    };

    let body = HealthResponse {
        status: status.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: START_TIME.elapsed().as_secs(),
        features,
    };

    ([(header::CACHE_CONTROL, "no-store, no-cache, must-revalidate")], Json(body))
}
