use std::sync::atomic::Ordering;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;
use talent_ledger::recruitment::{recruitment_router, SharedWorkspace};

use crate::infra::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct ProbePayload {
    pub(crate) status: &'static str,
}

/// Ledger API plus the operational probes.
pub(crate) fn with_service_routes(workspace: SharedWorkspace) -> Router {
    recruitment_router(workspace)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<ProbePayload> {
    Json(ProbePayload { status: "ok" })
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Acquire) {
        (StatusCode::OK, Json(ProbePayload { status: "ready" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ProbePayload {
                status: "initializing",
            }),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
