//! Reference admin backend for the storefront console.
//!
//! Serves the admin CRUD endpoints and the cart lookup over an in-memory
//! store, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use gateway::InMemoryGateway;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::admin::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::ops::health))
        .route(
            "/api/admin/{collection}",
            get(routes::admin::list).post(routes::admin::create),
        )
        .route(
            "/api/admin/{collection}/{id}",
            axum::routing::put(routes::admin::update)
                .patch(routes::admin::patch)
                .delete(routes::admin::delete),
        )
        .route("/api/cart/{user_id}", get(routes::cart::get))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over `backend`.
pub fn create_state(backend: InMemoryGateway) -> Arc<AppState> {
    Arc::new(AppState { backend })
}
