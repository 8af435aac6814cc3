//! Record pre-fill and reconciliation driven by the serial classifier.
//!
//! The record-keeping layer stores units by barcode. When a barcode is
//! scanned for the first time the form is pre-filled from the serial; when
//! a console record is saved, the serial-derived model and patch status are
//! kept in sync with what the technician submitted.

use serde::{Deserialize, Serialize};

use crate::serial::{classify_serial_with, DeviceType, PatchStatus, SerialRuleSet};

/// Model shown when the serial does not identify a specific variant.
pub const GENERIC_MODEL: &str = "Nintendo Switch";

/// Workflow status given to freshly scanned units.
pub const STATUS_RECEIVED: &str = "Received";

/// Form values for a barcode with no stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitPrefill {
    pub model: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub patch_status: PatchStatus,
    pub status: &'static str,
}

pub fn prefill(barcode: &str, rule_set: SerialRuleSet) -> UnitPrefill {
    let info = classify_serial_with(barcode, rule_set);
    let model = if info.has_known_model() {
        info.model
    } else {
        GENERIC_MODEL.to_string()
    };
    UnitPrefill {
        model,
        device_type: info.device_type,
        patch_status: info.patch_status,
        status: STATUS_RECEIVED,
    }
}

/// The classification-relevant part of a submitted unit form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitSubmission {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// No record exists yet for this barcode.
    #[serde(default)]
    pub is_new: bool,
}

/// Values to persist after reconciling a submission with its serial.
///
/// `patch_status: None` means the stored value must be left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub model: Option<String>,
    pub patch_status: Option<PatchStatus>,
    pub derived_from_serial: bool,
}

pub fn reconcile(
    barcode: &str,
    submission: &UnitSubmission,
    rule_set: SerialRuleSet,
) -> Reconciliation {
    let submitted_model = submission
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    if submission.device_type != DeviceType::Console {
        return Reconciliation {
            model: submitted_model,
            patch_status: None,
            derived_from_serial: false,
        };
    }

    let info = classify_serial_with(barcode, rule_set);

    let patch_status = if info.patch_status != PatchStatus::Unknown || submission.is_new {
        Some(info.patch_status)
    } else {
        None
    };
    let model = if info.has_known_model() {
        Some(info.model)
    } else {
        submitted_model
    };

    Reconciliation {
        model,
        patch_status,
        derived_from_serial: true,
    }
}
