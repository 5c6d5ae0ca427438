//! HTTP middleware: rate limiting and API key authentication.

use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::state::AppState;

/// Paths reachable without an API key (load balancer probes).
const PUBLIC_PATHS: &[&str] = &["/health"];

/// Rate limiting middleware. Checks per-IP request rate before routing.
pub(crate) async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    match state.rate_limiter.check(addr.ip()).await {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            tracing::debug!(ip = %addr.ip(), "rate limit exceeded");
            let body = serde_json::json!({
                "error": "rate limit exceeded",
                "retry_after": retry_after,
            });
            (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response()
        }
    }
}

/// The key a client presented, from `Authorization: Bearer <key>` or
/// `X-API-Key: <key>`. The bearer form wins when both are sent.
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    bearer.or_else(|| headers.get("x-api-key").and_then(|v| v.to_str().ok()))
}

/// API key authentication middleware.
///
/// Active only when `HMSIM_API_KEY` was set at startup.
pub(crate) async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    if PUBLIC_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    match presented_key(request.headers()) {
        Some(key) if key == expected => next.run(request).await,
        Some(_) => super::json_error(StatusCode::FORBIDDEN, "invalid API key").into_response(),
        None => {
            super::json_error(StatusCode::UNAUTHORIZED, "authentication required").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("from-header"));
        headers.insert("authorization", HeaderValue::from_static("Bearer from-bearer"));
        assert_eq!(presented_key(&headers), Some("from-bearer"));
    }

    #[test]
    fn falls_back_to_x_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        headers.insert("x-api-key", HeaderValue::from_static("secret"));
        assert_eq!(presented_key(&headers), Some("secret"));
        assert_eq!(presented_key(&HeaderMap::new()), None);
    }
}
