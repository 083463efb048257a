//! HTTP gateway (Axum) over the scoring pipeline.
//!
//! This module is primarily used by the `quill` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::trace::TraceLayer;

pub use handler::score_handler;
pub use state::HandlerState;

use crate::cache::{
    QUILL_STATUS_CONFIGURED, QUILL_STATUS_DISABLED, QUILL_STATUS_ENABLED,
    QUILL_STATUS_FALLBACK_ONLY, QUILL_STATUS_HEADER, QUILL_STATUS_HEALTHY, QUILL_STATUS_READY,
};

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/score", post(score_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub model: &'static str,
    pub cache: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        QUILL_STATUS_HEADER,
        HeaderValue::from_static(QUILL_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Always ready: a missing model or cache only changes how requests are scored.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let components = ComponentStatus {
        http: QUILL_STATUS_READY,
        model: if state.pipeline.has_model() {
            QUILL_STATUS_CONFIGURED
        } else {
            QUILL_STATUS_FALLBACK_ONLY
        },
        cache: if state.pipeline.has_cache() {
            QUILL_STATUS_ENABLED
        } else {
            QUILL_STATUS_DISABLED
        },
    };

    let mut headers = HeaderMap::new();
    headers.insert(QUILL_STATUS_HEADER, HeaderValue::from_static(QUILL_STATUS_READY));

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}

/// Hits `/healthz` on a local server. Backs the binary's `--health-check` flag.
pub async fn check_health(port: u16, timeout: Duration) -> bool {
    let url = format!("http://127.0.0.1:{}/healthz", port);
    let Ok(client) = reqwest::Client::builder().timeout(timeout).build() else {
        return false;
    };

    match client.get(&url).send().await {
        Ok(res) => res.status().is_success(),
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "Health check request failed");
            false
        }
    }
}
