pub mod diagnostics;
pub mod health;
pub mod serials;
pub mod units;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /diagnostics/boot                    classify a power reading (POST)
/// /diagnostics/pins                    analyze a USB-C pin check (POST)
///
/// /serials/{serial}                    classify a serial (GET, ?rule_set)
///
/// /units/{barcode}/prefill             form values for a new scan (GET)
/// /units/{barcode}/reconcile           sync a submission with its serial (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/diagnostics", diagnostics::router())
        .nest("/serials", serials::router())
        .nest("/units", units::router())
}
