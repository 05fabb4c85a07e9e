//! Operational endpoints: liveness and Prometheus scrape.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use common::EntityKind;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::routes::admin::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: usize,
    pub orders: usize,
    pub users: usize,
}

/// GET /health: liveness plus store sizes.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let backend = &state.backend;
    Json(HealthResponse {
        status: "ok",
        products: backend.count(EntityKind::Product).await,
        orders: backend.count(EntityKind::Order).await,
        users: backend.count(EntityKind::User).await,
    })
}

/// GET /metrics: Prometheus text exposition.
pub async fn metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], handle.render())
}
