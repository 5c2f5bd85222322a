//! HTTP router setup.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{api_key_auth, inject_request_id};
use crate::state::AppState;

/// Create the application router.
pub fn create(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/publications",
            post(handlers::publish)
                .layer(middleware::from_fn_with_state(state.clone(), api_key_auth)),
        )
        .route("/status", get(handlers::status))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(inject_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
