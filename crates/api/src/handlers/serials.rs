//! Handlers for the `/serials` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use triage_core::serial::{classify_serial_with, ClassificationInfo, SerialRuleSet};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Optional rule-set override accepted by serial-driven endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RuleSetQuery {
    pub rule_set: Option<String>,
}

/// Pick the requested rule set, or the configured default.
pub fn resolve_rule_set(state: &AppState, query: &RuleSetQuery) -> AppResult<SerialRuleSet> {
    match query.rule_set.as_deref() {
        Some(raw) => Ok(raw.parse::<SerialRuleSet>()?),
        None => Ok(state.config.serial_rule_set),
    }
}

/// GET /api/v1/serials/{serial}?rule_set=prefix3|prefix4
///
/// Classify a serial into device type, model and patch status. Unusable
/// serials still return 200 with an `Unknown` or `Manual Check Needed`
/// classification.
pub async fn classify(
    State(state): State<AppState>,
    Path(serial): Path<String>,
    Query(query): Query<RuleSetQuery>,
) -> AppResult<Json<DataResponse<ClassificationInfo>>> {
    let rule_set = resolve_rule_set(&state, &query)?;
    let info = classify_serial_with(&serial, rule_set);

    tracing::debug!(
        rule_set = %rule_set,
        device_type = %info.device_type,
        model = %info.model,
        patch_status = %info.patch_status,
        "Classified serial"
    );

    Ok(Json(DataResponse { data: info }))
}
