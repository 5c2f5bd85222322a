mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::{Harness, RecordingNotifier};
use lenspost_publisher::{create_router, AppState, ClientError, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(harness: Harness, api_key: Option<&str>) -> axum::Router {
    app_with_notifier(harness, api_key).0
}

fn app_with_notifier(
    harness: Harness,
    api_key: Option<&str>,
) -> (axum::Router, Arc<RecordingNotifier>) {
    let config = Config {
        api_key: api_key.map(str::to_string),
        ..Config::default()
    };
    let wired = harness.build();
    let router = create_router(Arc::new(AppState::with_controller(config, wired.controller)));
    (router, wired.notifier)
}

fn publish(body: Value) -> Request<Body> {
    Request::post("/publications")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_publish_success() -> Result<()> {
    let response = app(Harness::default(), None)
        .oneshot(publish(json!({"content": "Hello world"})))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = json_body(response).await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["tx_id"], json!("0xabc123"));
    assert_eq!(body["notification"]["title"], json!("Successfully posted"));
    assert_eq!(body["notification"]["variant"], json!("default"));
    Ok(())
}

#[tokio::test]
async fn test_publish_failure_is_unprocessable() -> Result<()> {
    let harness = Harness::default().wallet(Err(ClientError::new("User rejected the request.")));
    let response = app(harness, None)
        .oneshot(publish(json!({"content": "gm"})))
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["step"], json!("signature"));
    assert_eq!(body["error"], json!("User rejected the request."));
    assert_eq!(body["notification"]["description"], json!("Please try again later"));
    Ok(())
}

#[tokio::test]
async fn test_publish_rejects_empty_content() -> Result<()> {
    let response = app(Harness::default(), None)
        .oneshot(publish(json!({"content": ""})))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_publish_accepts_whitespace_only_content() -> Result<()> {
    let response = app(Harness::default(), None)
        .oneshot(publish(json!({"content": "   "})))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_response_notification_matches_sink() -> Result<()> {
    let harness = Harness::default().wallet(Err(ClientError::new("User rejected the request.")));
    let (router, notifier) = app_with_notifier(harness, None);

    let response = router.oneshot(publish(json!({"content": "gm"}))).await?;
    let body = json_body(response).await?;

    let sent = notifier.all();
    assert_eq!(sent.len(), 1);
    assert_eq!(body["notification"], serde_json::to_value(&sent[0])?);
    Ok(())
}

#[tokio::test]
async fn test_request_id_is_reused_or_generated() -> Result<()> {
    let router = app(Harness::default(), None);

    let mut request = Request::get("/status").body(Body::empty())?;
    request
        .headers_mut()
        .insert("x-request-id", "trace-42".parse()?);
    let echoed = router.clone().oneshot(request).await?;
    assert_eq!(echoed.headers()["x-request-id"], "trace-42");

    let generated = router
        .oneshot(publish(json!({"content": "gm"})))
        .await?;
    let id = generated.headers()["x-request-id"].to_str()?.to_string();
    assert!(id.starts_with("pub-"));
    Ok(())
}

#[tokio::test]
async fn test_publish_rejects_malformed_body() -> Result<()> {
    let response = app(Harness::default(), None)
        .oneshot(publish(json!({"text": "gm"})))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_api_key_required_when_configured() -> Result<()> {
    let router = app(Harness::default(), Some("s3cret"));

    let denied = router
        .clone()
        .oneshot(publish(json!({"content": "gm"})))
        .await?;
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let mut request = publish(json!({"content": "gm"}));
    request
        .headers_mut()
        .insert("authorization", "Bearer s3cret".parse()?);
    let allowed = router.oneshot(request).await?;
    assert_eq!(allowed.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_status_reports_idle() -> Result<()> {
    let response = app(Harness::default().without_wallet(), None)
        .oneshot(Request::get("/status").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body, json!({"state": "idle", "busy": false, "wallet_connected": false}));
    Ok(())
}

#[tokio::test]
async fn test_health_and_metrics() -> Result<()> {
    let router = app(Harness::default(), None);

    let health = router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty())?)
        .await?;
    let body = json_body(health).await?;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["app_id"], json!(common::APP_ID));

    let metrics = router
        .oneshot(Request::get("/metrics").body(Body::empty())?)
        .await?;
    assert_eq!(metrics.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(metrics.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("publisher_submissions_total"));
    assert!(text.contains("publisher_busy 0"));
    Ok(())
}
