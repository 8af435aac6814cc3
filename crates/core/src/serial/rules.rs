//! Serial-number rule sets.
//!
//! Two incompatible rule sets exist for deriving patch status from a
//! serial. They are kept side by side as named variants and never merged:
//!
//! - [`SerialRuleSet::Prefix3`]: three-character prefix (`XAW`, `XAJ`, ...)
//!   and the full 11-digit remainder, with one band per regional sub-batch.
//! - [`SerialRuleSet::Prefix4`]: the older rule set keyed on a
//!   four-character prefix (`XAW1`, `XAJ4`, ...) and a 10-digit remainder.
//!
//! The cutoffs are published manufacturing-batch boundaries and must stay
//! exact.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which serial rule set to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerialRuleSet {
    #[default]
    Prefix3,
    Prefix4,
}

impl SerialRuleSet {
    pub fn as_str(self) -> &'static str {
        match self {
            SerialRuleSet::Prefix3 => "prefix3",
            SerialRuleSet::Prefix4 => "prefix4",
        }
    }
}

impl std::fmt::Display for SerialRuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SerialRuleSet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix3" => Ok(SerialRuleSet::Prefix3),
            "prefix4" => Ok(SerialRuleSet::Prefix4),
            other => Err(CoreError::Validation(format!(
                "Unknown serial rule set '{other}'. Must be one of: prefix3, prefix4"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

pub const MODEL_UNKNOWN: &str = "Unknown";
pub const MODEL_ERISTA: &str = "Switch V1 (Erista)";
pub const MODEL_MARIKO: &str = "Switch V2 (Mariko)";
pub const MODEL_LITE: &str = "Switch Lite";
pub const MODEL_OLED: &str = "Switch OLED";
pub const MODEL_DOCK: &str = "Switch Dock";
/// Default model name used by the four-character rule set.
pub const MODEL_V1_LEGACY: &str = "Switch V1";

// ---------------------------------------------------------------------------
// Three-character prefix rules
// ---------------------------------------------------------------------------

/// Serials shorter than this cannot be classified by the current rule set.
pub const MIN_SERIAL_LEN: usize = 14;

/// One regional sub-batch: `[start, end)`, split into
/// unpatched `< warning_from <=` warning `< patched_from <=` patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchBand {
    pub start: u64,
    pub warning_from: u64,
    pub patched_from: u64,
    /// `None` for the last band of a prefix.
    pub end: Option<u64>,
}

impl BatchBand {
    pub fn contains(&self, number: u64) -> bool {
        number >= self.start && self.end.is_none_or(|end| number < end)
    }
}

/// Sub-batches 1, 4 and 7 for `XAW`.
pub const XAW_BANDS: &[BatchBand] = &[
    BatchBand {
        start: 10_000_000_000,
        warning_from: 10_074_000_000,
        patched_from: 10_120_000_000,
        end: Some(40_000_000_000),
    },
    BatchBand {
        start: 40_000_000_000,
        warning_from: 40_011_000_000,
        patched_from: 40_012_000_000,
        end: Some(70_000_000_000),
    },
    BatchBand {
        start: 70_000_000_000,
        warning_from: 70_017_800_000,
        patched_from: 70_030_000_000,
        end: None,
    },
];

/// Sub-batches 1, 4 and 7 for `XAJ`.
pub const XAJ_BANDS: &[BatchBand] = &[
    BatchBand {
        start: 10_000_000_000,
        warning_from: 10_020_000_000,
        patched_from: 10_030_000_000,
        end: Some(40_000_000_000),
    },
    BatchBand {
        start: 40_000_000_000,
        warning_from: 40_046_000_000,
        patched_from: 40_060_000_000,
        end: Some(70_000_000_000),
    },
    BatchBand {
        start: 70_000_000_000,
        warning_from: 70_040_000_000,
        patched_from: 70_050_000_000,
        end: None,
    },
];

/// Post-fix hardware prefixes that are always patched.
pub const PATCHED_HARDWARE_PREFIXES: &[&str] = &["XKW", "XKJ", "XJW", "XWW"];

pub const DOCK_PREFIX: &str = "XFL";

pub const OLED_PREFIX: &str = "XT";

// ---------------------------------------------------------------------------
// Four-character prefix rules
// ---------------------------------------------------------------------------

/// Serials shorter than this are sent to manual check by the older rule set.
pub const LEGACY_MIN_SERIAL_LEN: usize = 8;

/// Number of digits after the prefix the older rule set compares.
pub const LEGACY_NUMBER_DIGITS: usize = 10;

/// Unpatched below `warning_from`, possibly patched below `patched_from`,
/// patched otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyCutoff {
    pub prefix: &'static str,
    pub warning_from: u64,
    pub patched_from: u64,
}

pub const LEGACY_CUTOFFS: &[LegacyCutoff] = &[
    LegacyCutoff {
        prefix: "XAW1",
        warning_from: 10_074_000_000,
        patched_from: 10_120_000_000,
    },
    LegacyCutoff {
        prefix: "XAW4",
        warning_from: 40_011_000_000,
        patched_from: 40_012_000_000,
    },
    LegacyCutoff {
        prefix: "XAW7",
        warning_from: 70_017_800_000,
        patched_from: 70_030_000_000,
    },
    LegacyCutoff {
        prefix: "XAJ1",
        warning_from: 10_020_000_000,
        patched_from: 10_030_000_000,
    },
    LegacyCutoff {
        prefix: "XAJ4",
        warning_from: 40_053_300_000,
        patched_from: 40_060_000_000,
    },
    LegacyCutoff {
        prefix: "XAJ7",
        warning_from: 70_040_000_000,
        patched_from: 70_050_000_000,
    },
];
