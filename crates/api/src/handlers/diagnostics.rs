//! Handlers for the `/diagnostics` resource.
//!
//! Both endpoints are pure classification: nothing is persisted here. The
//! caller stores whatever it wants to keep on the unit record.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use triage_core::diagnostics::{classify_reading_with, DiagnosticResult};
use triage_core::pins::{analyze, parse_pin_json, PinReport};
use triage_core::serial::DeviceType;
use triage_core::test_method::TestMethod;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the boot diagnosis endpoint.
#[derive(Debug, Deserialize)]
pub struct DiagnoseBootRequest {
    /// Raw reading as typed, e.g. `15V/0.003A` or `200mA`.
    #[serde(default)]
    pub amp_draw: Option<String>,
    /// `battery`, `bench`, `bypass` or `no_battery`.
    #[serde(default)]
    pub test_method: Option<String>,
}

/// POST /api/v1/diagnostics/boot
///
/// Classify a power reading. Always answers 200 with a verdict; readings
/// that match nothing come back as "Unknown Behavior". The result fields
/// are returned at the top level, without a `data` envelope.
pub async fn diagnose_boot(
    State(state): State<AppState>,
    Json(body): Json<DiagnoseBootRequest>,
) -> Json<DiagnosticResult> {
    let method = match body.test_method.as_deref().map(str::trim) {
        None | Some("") => TestMethod::default(),
        Some(raw) => TestMethod::resolve(raw).unwrap_or_else(|| {
            tracing::warn!(test_method = %raw, "Unrecognized test method, using battery table");
            TestMethod::default()
        }),
    };

    let reading = body.amp_draw.as_deref().unwrap_or_default();
    let result = classify_reading_with(state.rulebook, reading, method);

    tracing::debug!(
        method = %method,
        amps = result.amps,
        volts = ?result.volts,
        stage = %result.stage,
        severity = %result.severity,
        "Classified boot reading"
    );

    Json(result)
}

/// Request body for the pin check endpoint.
#[derive(Debug, Deserialize)]
pub struct PinCheckRequest {
    /// Readings keyed by pin number (`"1"`..`"24"`), as text or numbers.
    pub pins: BTreeMap<String, serde_json::Value>,
    /// `Console` (default) or `Dock`.
    #[serde(default, alias = "type")]
    pub device_type: Option<DeviceType>,
}

/// POST /api/v1/diagnostics/pins
///
/// Analyze a USB-C diode-mode pin check. Returns 400 if no readings are
/// supplied or a key is not a pin number from 1 to 24.
pub async fn analyze_pins(
    Json(body): Json<PinCheckRequest>,
) -> AppResult<Json<DataResponse<PinReport>>> {
    let readings = parse_pin_json(&body.pins)?;
    if readings.is_empty() {
        return Err(AppError::BadRequest("No pin readings supplied".into()));
    }
    let device = body.device_type.unwrap_or(DeviceType::Console);
    let report = analyze(&readings, device);

    tracing::debug!(
        device = %device,
        pins = readings.len(),
        findings = report.findings.len(),
        ripped_off = report.ripped_off,
        "Analyzed pin check"
    );

    Ok(Json(DataResponse { data: report }))
}
