//! Core HTTP route handlers: health, registry, analyze.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use super::json_error;
use super::state::AppState;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// GET /registry
pub(crate) async fn handle_registry(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.registry.summary()))
}

/// POST /analyze
pub(crate) async fn handle_analyze(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                &format!("invalid sample: {}", rejection.body_text()),
            )
            .into_response()
        }
    };
    let sample: hmsim_quality::Sample = match serde_json::from_value(body) {
        Ok(s) => s,
        Err(e) => {
            return json_error(StatusCode::BAD_REQUEST, &format!("invalid sample: {}", e))
                .into_response()
        }
    };

    let result = hmsim_quality::analyze(&sample);
    (StatusCode::OK, Json(result)).into_response()
}
