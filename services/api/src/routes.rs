use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;

use crate::infra::AppState;
use placement_plus::workflows::placements::{
    placement_router, PlacementRecordingService, PlacementRepository,
};

pub(crate) fn with_placement_routes<R>(
    service: Arc<PlacementRecordingService<R>>,
) -> axum::Router
where
    R: PlacementRepository + 'static,
{
    placement_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

async fn healthcheck() -> impl IntoResponse {
    StatusCode::OK
}

async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Acquire) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    state.metrics.render()
}
