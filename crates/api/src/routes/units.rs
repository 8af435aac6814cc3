//! Route definitions for the `/units` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::units;
use crate::state::AppState;

/// Routes mounted at `/units`.
///
/// ```text
/// GET  /{barcode}/prefill     -> prefill
/// POST /{barcode}/reconcile   -> reconcile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{barcode}/prefill", get(units::prefill))
        .route("/{barcode}/reconcile", post(units::reconcile))
}
