use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use triage_core::rulebook::RulebookSummary;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Rule tables the classifiers are running with.
    pub rulebook: RulebookSummary,
}

/// GET /health -- returns service status and the active rulebook.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        rulebook: state.rulebook.summary(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
