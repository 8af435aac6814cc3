//! Serial number → device type, model and patch status.

use serde::{Deserialize, Serialize};

use crate::rulebook::RULEBOOK;
use crate::serial::rules::{
    BatchBand, SerialRuleSet, DOCK_PREFIX, LEGACY_CUTOFFS, LEGACY_MIN_SERIAL_LEN,
    LEGACY_NUMBER_DIGITS, MIN_SERIAL_LEN, MODEL_DOCK, MODEL_ERISTA, MODEL_LITE, MODEL_MARIKO,
    MODEL_OLED, MODEL_UNKNOWN, MODEL_V1_LEGACY, OLED_PREFIX, PATCHED_HARDWARE_PREFIXES,
    XAJ_BANDS, XAW_BANDS,
};

/// Kind of unit a serial belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Console,
    Dock,
    Unknown,
    #[serde(rename = "Manual Check Needed")]
    ManualCheckNeeded,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Console => "Console",
            DeviceType::Dock => "Dock",
            DeviceType::Unknown => "Unknown",
            DeviceType::ManualCheckNeeded => "Manual Check Needed",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the console's bootROM exploit is still reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatchStatus {
    Unpatched,
    Warning,
    #[serde(rename = "Possibly Patched")]
    PossiblyPatched,
    Patched,
    #[serde(rename = "N/A")]
    NotApplicable,
    Unknown,
    #[serde(rename = "Unknown (Check Manually)")]
    UnknownCheckManually,
}

impl PatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PatchStatus::Unpatched => "Unpatched",
            PatchStatus::Warning => "Warning",
            PatchStatus::PossiblyPatched => "Possibly Patched",
            PatchStatus::Patched => "Patched",
            PatchStatus::NotApplicable => "N/A",
            PatchStatus::Unknown => "Unknown",
            PatchStatus::UnknownCheckManually => "Unknown (Check Manually)",
        }
    }
}

impl std::fmt::Display for PatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single serial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationInfo {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub model: String,
    pub patch_status: PatchStatus,
}

impl ClassificationInfo {
    fn new(device_type: DeviceType, model: &str, patch_status: PatchStatus) -> Self {
        Self {
            device_type,
            model: model.to_string(),
            patch_status,
        }
    }

    fn unknown() -> Self {
        Self::new(DeviceType::Unknown, MODEL_UNKNOWN, PatchStatus::Unknown)
    }

    fn manual_check() -> Self {
        Self::new(
            DeviceType::ManualCheckNeeded,
            MODEL_UNKNOWN,
            PatchStatus::Unknown,
        )
    }

    /// Whether the model was identified.
    pub fn has_known_model(&self) -> bool {
        self.model != MODEL_UNKNOWN
    }
}

/// Classify a serial with the rulebook's default rule set.
pub fn classify_serial(serial: &str) -> ClassificationInfo {
    classify_serial_with(serial, RULEBOOK.default_serial_rule_set)
}

/// Classify a serial with an explicit rule set.
pub fn classify_serial_with(serial: &str, rule_set: SerialRuleSet) -> ClassificationInfo {
    let normalized = serial.trim().to_uppercase();
    if normalized.is_empty() {
        return ClassificationInfo::unknown();
    }
    match rule_set {
        SerialRuleSet::Prefix3 => classify_prefix3(&normalized),
        SerialRuleSet::Prefix4 => classify_prefix4(&normalized),
    }
}

/// Split off the first `n` characters. Works on chars so multi-byte input
/// never lands inside a code point.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(idx)
}

/// Digits only, no sign. Values past `u64::MAX` saturate, which puts them
/// in the last open-ended band.
fn parse_serial_number(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

fn band_status(bands: &[BatchBand], number: u64) -> PatchStatus {
    match bands.iter().find(|b| b.contains(number)) {
        Some(band) if number < band.warning_from => PatchStatus::Unpatched,
        Some(band) if number < band.patched_from => PatchStatus::Warning,
        Some(_) => PatchStatus::Patched,
        None => PatchStatus::Unknown,
    }
}

fn classify_prefix3(serial: &str) -> ClassificationInfo {
    if serial.chars().count() < MIN_SERIAL_LEN {
        return ClassificationInfo::manual_check();
    }

    let (prefix, rest) = split_chars(serial, 3);
    let Some(number) = parse_serial_number(rest) else {
        return ClassificationInfo::manual_check();
    };

    match prefix {
        "XAW" => ClassificationInfo::new(
            DeviceType::Console,
            MODEL_ERISTA,
            band_status(XAW_BANDS, number),
        ),
        "XAJ" => ClassificationInfo::new(
            DeviceType::Console,
            MODEL_ERISTA,
            band_status(XAJ_BANDS, number),
        ),
        p if PATCHED_HARDWARE_PREFIXES.contains(&p) => {
            let model = if p.starts_with("XK") || p == "XWW" {
                MODEL_MARIKO
            } else if p == "XJW" {
                MODEL_LITE
            } else {
                MODEL_ERISTA
            };
            ClassificationInfo::new(DeviceType::Console, model, PatchStatus::Patched)
        }
        DOCK_PREFIX => {
            ClassificationInfo::new(DeviceType::Dock, MODEL_DOCK, PatchStatus::NotApplicable)
        }
        _ if serial.starts_with(OLED_PREFIX) => {
            ClassificationInfo::new(DeviceType::Console, MODEL_OLED, PatchStatus::Patched)
        }
        _ => ClassificationInfo::new(
            DeviceType::Console,
            MODEL_ERISTA,
            PatchStatus::UnknownCheckManually,
        ),
    }
}

fn classify_prefix4(serial: &str) -> ClassificationInfo {
    let (_, after_three) = split_chars(serial, 3);
    if !after_three.chars().any(|c| c.is_ascii_digit()) {
        return ClassificationInfo::unknown();
    }
    if serial.chars().count() < LEGACY_MIN_SERIAL_LEN {
        return ClassificationInfo::manual_check();
    }

    let (prefix, rest) = split_chars(serial, 4);
    let (digits, _) = split_chars(rest, LEGACY_NUMBER_DIGITS);
    let Some(number) = parse_serial_number(digits) else {
        return ClassificationInfo::manual_check();
    };

    let (model, patch_status) = if let Some(cutoff) =
        LEGACY_CUTOFFS.iter().find(|c| c.prefix == prefix)
    {
        let status = if number < cutoff.warning_from {
            PatchStatus::Unpatched
        } else if number < cutoff.patched_from {
            PatchStatus::PossiblyPatched
        } else {
            PatchStatus::Patched
        };
        (MODEL_V1_LEGACY, status)
    } else if prefix.starts_with("XK") {
        (MODEL_MARIKO, PatchStatus::Patched)
    } else if prefix.starts_with("XJ") {
        (MODEL_LITE, PatchStatus::Patched)
    } else if prefix.starts_with("XW") {
        (MODEL_V1_LEGACY, PatchStatus::Patched)
    } else if prefix.starts_with(OLED_PREFIX) {
        (MODEL_OLED, PatchStatus::Patched)
    } else {
        (MODEL_V1_LEGACY, PatchStatus::UnknownCheckManually)
    };

    ClassificationInfo::new(DeviceType::Console, model, patch_status)
}
