//! Reaction simulation handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hmsim_eval::{CollectingSink, Environment, Simulator, SimulatorConfig, MAX_DEPTH};
use serde::Deserialize;

use super::json_error;
use super::state::AppState;

/// Largest `max_depth` a client may ask for.
const MAX_REQUEST_DEPTH: usize = 100;

#[derive(Debug, Deserialize)]
struct SimulateRequest {
    compounds: Vec<String>,
    #[serde(default)]
    environment: Environment,
    #[serde(default)]
    max_depth: Option<usize>,
}

/// POST /simulate
///
/// Body: `{"compounds": [...], "environment": {...}?, "max_depth": n?}`.
/// Responds with the chain plus any equations skipped as malformed. An
/// empty chain is a normal 200 response.
pub(crate) async fn handle_simulate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                &format!("invalid request: {}", rejection.body_text()),
            )
            .into_response()
        }
    };
    let request: SimulateRequest = match serde_json::from_value(body) {
        Ok(r) => r,
        Err(e) => {
            return json_error(StatusCode::BAD_REQUEST, &format!("invalid request: {}", e))
                .into_response()
        }
    };

    let max_depth = request.max_depth.unwrap_or(MAX_DEPTH);
    if max_depth > MAX_REQUEST_DEPTH {
        return json_error(
            StatusCode::BAD_REQUEST,
            &format!("max_depth must be at most {}", MAX_REQUEST_DEPTH),
        )
        .into_response();
    }

    let sink = CollectingSink::new();
    let chain = Simulator::new(&state.registry)
        .with_config(SimulatorConfig { max_depth })
        .with_sink(&sink)
        .run(&request.compounds, &request.environment);

    let warnings = sink.into_events();
    for warning in &warnings {
        tracing::warn!(
            equation = %warning.equation,
            reason = %warning.reason,
            "skipping malformed equation"
        );
    }

    let response = serde_json::json!({
        "chain": chain,
        "warnings": warnings,
    });
    (StatusCode::OK, Json(response)).into_response()
}
