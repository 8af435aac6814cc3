//! Route definitions for the `/diagnostics` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::diagnostics;
use crate::state::AppState;

/// Routes mounted at `/diagnostics`.
///
/// ```text
/// POST /boot   -> diagnose_boot
/// POST /pins   -> analyze_pins
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/boot", post(diagnostics::diagnose_boot))
        .route("/pins", post(diagnostics::analyze_pins))
}
