//! Handlers for the `/units` resource.
//!
//! The record store itself lives elsewhere; these endpoints compute what a
//! unit form should be pre-filled with and what to write back on save.

use axum::extract::{Path, Query, State};
use axum::Json;
use triage_core::intake::{self, Reconciliation, UnitPrefill, UnitSubmission};

use crate::error::AppResult;
use crate::handlers::serials::{resolve_rule_set, RuleSetQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/units/{barcode}/prefill
///
/// Form values for a barcode that has no stored record yet.
pub async fn prefill(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
    Query(query): Query<RuleSetQuery>,
) -> AppResult<Json<DataResponse<UnitPrefill>>> {
    let rule_set = resolve_rule_set(&state, &query)?;
    let data = intake::prefill(&barcode, rule_set);
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/units/{barcode}/reconcile
///
/// Derive the model and patch status to persist for a submitted unit form.
pub async fn reconcile(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
    Query(query): Query<RuleSetQuery>,
    Json(submission): Json<UnitSubmission>,
) -> AppResult<Json<DataResponse<Reconciliation>>> {
    let rule_set = resolve_rule_set(&state, &query)?;
    let data = intake::reconcile(&barcode, &submission, rule_set);

    tracing::debug!(
        barcode = %barcode,
        derived_from_serial = data.derived_from_serial,
        patch_status = ?data.patch_status,
        "Reconciled unit submission"
    );

    Ok(Json(DataResponse { data }))
}
