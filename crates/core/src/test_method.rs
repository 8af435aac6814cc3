//! Physical measurement setups that select a range table.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The measurement setup a reading was taken with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestMethod {
    /// Battery connected, charger on USB-C.
    #[default]
    Battery,
    /// Bench supply (~4.2V) on the battery connector.
    Bench,
    /// 10K resistor bypass injecting into VSYS.
    Bypass,
    /// USB-C input with the battery disconnected.
    NoBattery,
}

/// All methods in display order.
pub const ALL_TEST_METHODS: &[TestMethod] = &[
    TestMethod::Battery,
    TestMethod::Bench,
    TestMethod::Bypass,
    TestMethod::NoBattery,
];

impl TestMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            TestMethod::Battery => "battery",
            TestMethod::Bench => "bench",
            TestMethod::Bypass => "bypass",
            TestMethod::NoBattery => "no_battery",
        }
    }

    /// Lenient lookup used at request boundaries.
    ///
    /// Accepts any case, surrounding whitespace and `-` in place of `_`.
    /// Returns `None` for anything unrecognised; callers fall back to
    /// [`TestMethod::Battery`].
    pub fn resolve(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "battery" => Some(TestMethod::Battery),
            "bench" => Some(TestMethod::Bench),
            "bypass" => Some(TestMethod::Bypass),
            "no_battery" | "nobattery" => Some(TestMethod::NoBattery),
            _ => None,
        }
    }

    /// Resolve a method name, falling back to `battery` when unrecognised.
    pub fn resolve_or_default(raw: &str) -> Self {
        Self::resolve(raw).unwrap_or_default()
    }
}

impl std::fmt::Display for TestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestMethod {
    type Err = CoreError;

    /// Strict parse: only the canonical snake_case names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_TEST_METHODS
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown test method '{s}'. Must be one of: battery, bench, bypass, no_battery"
                ))
            })
    }
}
