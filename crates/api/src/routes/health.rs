use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the browse session task answers.
    pub session_healthy: bool,
    /// Number of bookmarked characters.
    pub favorites: usize,
    /// Live subscribers on the signal bus.
    pub signal_subscribers: usize,
}

/// GET /health -- returns service and session health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let session_healthy = state.session.current().await.is_ok();

    let status = if session_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        session_healthy,
        favorites: state.favorites.len(),
        signal_subscribers: state.event_bus.subscriber_count(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
