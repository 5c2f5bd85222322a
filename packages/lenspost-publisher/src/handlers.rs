//! HTTP request handlers.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::{info, info_span, warn, Instrument};

use crate::metrics::METRICS;
use crate::middleware::RequestId;
use crate::response::{HealthResponse, PublishResponse, StatusResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PublishRequest {
    pub content: String,
}

/// Run one submission. `POST /publications`
pub async fn publish(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    body: Result<Json<PublishRequest>, JsonRejection>,
) -> (StatusCode, Json<PublishResponse>) {
    let request_id = request_id
        .map(|Extension(id)| id)
        .unwrap_or_else(RequestId::generate);
    let span = info_span!("publish", req_id = %request_id);

    async move {
        let request = match body {
            Ok(Json(r)) => r,
            Err(e) => {
                warn!(error = %e, "Invalid JSON body");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(PublishResponse::rejected("Body must be {\"content\": string}")),
                );
            }
        };

        if request.content.is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(PublishResponse::rejected("Content must not be empty")),
            );
        }

        info!(chars = request.content.chars().count(), "Publishing");

        let outcome = state.controller.submit(request.content).await;
        let status = if outcome.is_success() {
            StatusCode::OK
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };

        info!(success = outcome.is_success(), "Publish finished");
        (status, Json(PublishResponse::from_outcome(&outcome)))
    }
    .instrument(span)
    .await
}

/// Current submission state. `GET /status`
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let current = state.controller.state();
    Json(StatusResponse {
        state: current,
        busy: current.is_busy(),
        wallet_connected: state.controller.has_wallet(),
    })
}

/// Health check.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = if state.controller.has_wallet() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        app_id: state.controller.app_id().to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        submissions: METRICS.submissions_total.load(Ordering::Relaxed),
    })
}

/// Prometheus metrics in text exposition format.
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = METRICS.render(state.controller.is_busy());
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        body,
    )
}
