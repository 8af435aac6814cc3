//! Route definitions for the `/serials` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::serials;
use crate::state::AppState;

/// Routes mounted at `/serials`.
///
/// ```text
/// GET /{serial}   -> classify   (?rule_set=prefix3|prefix4)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{serial}", get(serials::classify))
}
