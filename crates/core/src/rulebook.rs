//! The versioned rule resource shared by every classifier.
//!
//! Range tables, override rules and the serial rule-set choice live in one
//! immutable `static`. Adding a new snapshot of the tables means adding a
//! new [`Rulebook`] value with its own version, not editing classifier code.

use serde::Serialize;

use crate::diagnostics::overrides::{OverrideRule, OVERRIDE_RULES};
use crate::diagnostics::tables::{
    RangeEntry, BATTERY_TABLE, BENCH_TABLE, BYPASS_TABLE, NO_BATTERY_TABLE,
};
use crate::serial::SerialRuleSet;
use crate::test_method::TestMethod;

pub const RULEBOOK_VERSION: &str = "2024.2";

#[derive(Debug)]
pub struct Rulebook {
    pub version: &'static str,
    pub battery: &'static [RangeEntry],
    pub bench: &'static [RangeEntry],
    pub bypass: &'static [RangeEntry],
    pub no_battery: &'static [RangeEntry],
    pub overrides: &'static [OverrideRule],
    pub default_serial_rule_set: SerialRuleSet,
}

impl Rulebook {
    /// The ordered range table for a test method.
    pub fn range_table(&self, method: TestMethod) -> &'static [RangeEntry] {
        match method {
            TestMethod::Battery => self.battery,
            TestMethod::Bench => self.bench,
            TestMethod::Bypass => self.bypass,
            TestMethod::NoBattery => self.no_battery,
        }
    }

    /// Serializable outline for health and admin endpoints.
    pub fn summary(&self) -> RulebookSummary {
        RulebookSummary {
            version: self.version,
            range_entries: self.battery.len()
                + self.bench.len()
                + self.bypass.len()
                + self.no_battery.len(),
            override_rules: self.overrides.len(),
            default_serial_rule_set: self.default_serial_rule_set,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RulebookSummary {
    pub version: &'static str,
    pub range_entries: usize,
    pub override_rules: usize,
    pub default_serial_rule_set: SerialRuleSet,
}

pub static RULEBOOK: Rulebook = Rulebook {
    version: RULEBOOK_VERSION,
    battery: BATTERY_TABLE,
    bench: BENCH_TABLE,
    bypass: BYPASS_TABLE,
    no_battery: NO_BATTERY_TABLE,
    overrides: OVERRIDE_RULES,
    default_serial_rule_set: SerialRuleSet::Prefix3,
};
