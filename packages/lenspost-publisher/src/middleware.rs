//! Authentication and request correlation middleware.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use rand::Rng;
use subtle::ConstantTimeEq;

use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Validate `X-Api-Key` or `Authorization: Bearer` header.
/// Bypassed when no API key is configured (dev mode).
pub async fn api_key_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let expected = match state.config.api_key.as_deref() {
        Some(key) => key,
        None => return next.run(request).await,
    };

    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            request
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
        .map(str::to_string);

    match provided {
        Some(ref key)
            if key.len() == expected.len() && key.as_bytes().ct_eq(expected.as_bytes()).into() =>
        {
            next.run(request).await
        }
        _ => {
            let body = serde_json::json!({
                "success": false,
                "error": "Unauthorized: invalid or missing API key"
            });
            (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
        }
    }
}

/// Reuse the caller's `x-request-id` or mint one, expose it to handlers as a
/// [`RequestId`] extension and echo it on the response.
pub async fn inject_request_id(mut request: Request, next: Next) -> Response {
    let request_id =
        RequestId::from_headers(request.headers()).unwrap_or_else(RequestId::generate);
    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;
    if let Ok(val) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    response
}

/// Correlation id for one HTTP request. Carried into the `publish` span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// `pub-` followed by 16 random hex digits.
    pub fn generate() -> Self {
        Self(format!("pub-{:016x}", rand::thread_rng().gen::<u64>()))
    }

    /// Caller-supplied id. Empty or non-visible-ASCII values are ignored.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_distinct() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert!(a.as_str().starts_with("pub-"));
        assert_eq!(a.as_str().len(), 20);
        assert_ne!(a, b);
    }

    #[test]
    fn test_caller_id_is_reused() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("trace-42"));
        let id = RequestId::from_headers(&headers).map(|id| id.to_string());
        assert_eq!(id.as_deref(), Some("trace-42"));

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  "));
        assert_eq!(RequestId::from_headers(&headers), None);
    }
}
