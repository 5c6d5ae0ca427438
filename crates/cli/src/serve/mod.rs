//! `hmsim serve` -- HTTP JSON API over the simulator and index calculator.
//!
//! Exposes the reaction simulator and water-quality indices as an async
//! HTTP service using `axum` + `tokio`. The registry is loaded once at
//! startup and shared read-only by every request.
//!
//! Security features:
//! - CORS headers on all responses (permissive for local dev)
//! - Per-IP rate limiting (default: 60 req/min, `HMSIM_RATE_LIMIT`)
//! - Optional API key authentication via `HMSIM_API_KEY`
//!
//! Endpoints:
//! - GET  /health     - Server status (exempt from auth)
//! - GET  /registry   - Summary of the loaded registry
//! - POST /simulate   - Reaction chain for a set of compounds
//! - POST /analyze    - HPI / HEI / Cd for one water sample
//!
//! All responses use Content-Type: application/json.

mod handlers;
mod middleware;
mod simulate;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{middleware as axum_middleware, Json, Router};
use hmsim_eval::Registry;
use tower_http::cors::{Any, CorsLayer};

use self::handlers::{handle_analyze, handle_health, handle_not_found, handle_registry};
use self::middleware::{auth_middleware, rate_limit_middleware};
use self::simulate::handle_simulate;
use self::state::{AppState, RateLimiter};

/// Maximum request body size: 10 MB.
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Default rate limit: 60 requests per minute per IP.
const DEFAULT_RATE_LIMIT: u64 = 60;

/// Rate limit window duration in seconds (1 minute).
const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({"error": message})))
}

/// Build the router. Split out so tests can drive it without a socket.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    // CORS: permissive for local dev
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/registry", get(handle_registry))
        .route("/simulate", post(handle_simulate))
        .route("/analyze", post(handle_analyze))
        .fallback(handle_not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state)
}

/// Start the HTTP server on the given port.
///
/// The registry must load; a server with no registry refuses to start
/// rather than answering every simulation with an empty chain.
pub async fn start_server(
    port: u16,
    registry_path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::from_path(&registry_path)?;
    tracing::info!(
        path = %registry_path.display(),
        blocks = registry.len(),
        rules = registry.rule_count(),
        "loaded registry"
    );

    // Rate limit: from HMSIM_RATE_LIMIT env var, or default
    let rate_limit = std::env::var("HMSIM_RATE_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT);

    // API key: from HMSIM_API_KEY env var (None = no auth)
    let api_key = std::env::var("HMSIM_API_KEY")
        .ok()
        .filter(|k| !k.is_empty());

    if api_key.is_some() {
        tracing::info!("API key authentication enabled");
    }
    tracing::info!(rate_limit, "requests per minute per IP");

    let state = Arc::new(AppState {
        registry,
        rate_limiter: RateLimiter::new(rate_limit),
        api_key,
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("hmsim listening on http://0.0.0.0:{}", port);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server shut down");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
