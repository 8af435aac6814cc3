//! Current-draw range tables and first-match lookup.
//!
//! Entries are half-open `[low, high)` intervals in amps. Tables are neither
//! disjoint nor exhaustive: the first entry in declared order that contains
//! the value wins, so the order of each table is part of its meaning.

use serde::Serialize;

use crate::diagnostics::Verdict;
use crate::severity::Severity;

/// One row of a range table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeEntry {
    pub low: f64,
    pub high: f64,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl RangeEntry {
    /// `low <= amps < high`.
    pub fn contains(&self, amps: f64) -> bool {
        self.low <= amps && amps < self.high
    }
}

const fn entry(
    low: f64,
    high: f64,
    stage: &'static str,
    fault: &'static str,
    action: &'static str,
    severity: Severity,
) -> RangeEntry {
    RangeEntry {
        low,
        high,
        verdict: Verdict {
            stage,
            fault,
            action,
            severity,
        },
    }
}

/// Return the first entry whose interval contains `amps`.
pub fn lookup(entries: &[RangeEntry], amps: f64) -> Option<&RangeEntry> {
    entries.iter().find(|e| e.contains(amps))
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Battery connected, charger on USB-C.
#[rustfmt::skip]
pub const BATTERY_TABLE: &[RangeEntry] = &[
    entry(0.00, 0.005, "No Power", "Blown Fuse / USB-C Port",
        "Check F1 fuse near USB-C, inspect port pins", Severity::Critical),
    entry(0.005, 0.015, "Sleep Mode", "None (Normal)",
        "Console is in Sleep Mode. Wake it up to test further.", Severity::None),
    entry(0.015, 0.09, "Stage 1 (Waiting for Battery)", "Battery Detection / PMIC",
        "Check battery connector, MAX77620 communication", Severity::High),
    entry(0.15, 0.28, "RCM / eMMC Fault", "Missing/Corrupt eMMC or AutoRCM",
        "Test RCM mode, check eMMC seating/soldering", Severity::Medium),
    entry(0.40, 0.55, "Stage 2 (Normal Boot Start)", "Fuel Gauge / Backlight",
        "Check MAX17050, backlight driver if no display", Severity::Low),
    entry(0.70, 5.00, "Normal Operation / Fast Charge", "None (Normal)",
        "System is booting or charging normally", Severity::None),
];

/// Bench supply on the battery connector.
///
/// "1st Stage Boot OK" overlaps the wider "Stuck First Stage" band and must
/// stay ahead of it.
#[rustfmt::skip]
pub const BENCH_TABLE: &[RangeEntry] = &[
    entry(0.00, 0.001, "No Power Draw", "Faulty MAX77620 / Connection",
        "Check power button FPC, resistor on Pin 1, or replace MAX77620.", Severity::Critical),
    entry(0.001, 0.006, "VSYS Idle (OK)", "None (Ready to Boot)",
        "Good standby draw (1-5mA). Short pins 1 & 2 to power on.", Severity::None),
    entry(0.006, 0.05, "High Idle / Stuck", "VSYS Short / BQ Fail",
        "Check coils/caps near BQ24193 with thermal cam.", Severity::High),
    entry(0.130, 0.145, "Failing 2nd Stage", "MAX77621 or MAX77812",
        "1st Stage OK, but 2nd stage regulator failing. Check MAX77621/77812.", Severity::High),
    entry(0.190, 0.220, "1st Stage Boot OK", "None (Battery I2C Absent)",
        "Normal for bench test. MAX77620 soft-boot working.", Severity::None),
    entry(0.100, 0.300, "Stuck First Stage", "3.3V Rail / P13 / M92T",
        "Check 3.3V rail, P13USB, M92T36, Audio IC for shorts.", Severity::Medium),
    entry(0.300, 2.00, "Short after Boot", "Component Short",
        "High draw. Use thermal camera to find heating component.", Severity::High),
];

/// 10K resistor bypass injecting into VSYS.
#[rustfmt::skip]
pub const BYPASS_TABLE: &[RangeEntry] = &[
    entry(0.00, 0.001, "Bypass Failed", "Open VSYS or Resistor",
        "Check 10K resistor solder to test pads. No current flow.", Severity::Critical),
    entry(0.001, 0.006, "Ready to Boot", "None (Pre-Trigger)",
        "Healthy standby current (1-5mA). Short power pads to boot.", Severity::None),
    entry(0.006, 0.090, "Sleep Mode", "None (Normal)",
        "Console is in Sleep Mode (8-13mA normal).", Severity::None),
    entry(0.100, 0.120, "Stuck ~100mA", "Fuel Gauge / MAX77621",
        "If stops fast at 100mA: MAX17050. If static 100mA: MAX77621.", Severity::High),
    entry(0.120, 0.125, "eMMC Corruption", "Dead eMMC (Hynix?)",
        "Try Modchip to confirm eMMC error code.", Severity::Critical),
    entry(0.180, 0.240, "Bad eMMC / AutoRCM", "eMMC / AutoRCM",
        "Stuck 200mA? Bad eMMC. Stuck 240mA? Corrupt AutoRCM.", Severity::Medium),
    entry(0.280, 0.320, "Bad P13USB", "Short on 3.3V Rail",
        "Check 3.3V rail. Likely P13USB shorted by 15V VBUS.", Severity::High),
    entry(0.400, 0.800, "2nd Stage Boot OK", "None (Booting)",
        "Normal Boot: 400-500mA (No LCD) / 500-800mA (With LCD).", Severity::None),
    entry(0.800, 3.00, "Severe Short", "Main Rail Short",
        "Check VSYS/VCORE for dead shorts. BQ Inductor overheating?", Severity::Critical),
];

/// USB-C input with the battery disconnected.
#[rustfmt::skip]
pub const NO_BATTERY_TABLE: &[RangeEntry] = &[
    entry(0.00, 0.005, "Dead Charging Path", "F1 Fuse / M92T36 / BQ24193",
        "Check F1 Fuse near USB-C. Verify 5V/15V at M92T36.", Severity::Critical),
    entry(0.005, 0.06, "Healthy Idle", "None (Normal)",
        "PD Negotiation OK. BQ Idle. Perfectly fine measurement waiting for a battery.", Severity::None),
    entry(0.06, 0.35, "Abnormal Idle Pull", "Partial Short / M92T",
        "Check for heat on M92T36 or BQ caps. Slightly high for idle.", Severity::Medium),
    entry(0.40, 0.60, "BQ Search Activity", "None (Normal)",
        "Good pulse. Charging circuit is actively searching for a battery.", Severity::None),
    entry(0.60, 5.00, "Severe Power Fault", "Short on VSYS / Tegra",
        "Short detected. Check VSYS rail and Tegra PMIC area.", Severity::Critical),
];

#[cfg(test)]
mod tests {
    use super::*;

    const OVERLAPPING: &[RangeEntry] = &[
        entry(0.10, 0.20, "Narrow", "first", "", Severity::Low),
        entry(0.00, 1.00, "Wide", "second", "", Severity::High),
    ];

    fn stage_at(entries: &[RangeEntry], amps: f64) -> Option<&'static str> {
        lookup(entries, amps).map(|e| e.verdict.stage)
    }

    #[test]
    fn overlap_resolves_to_first_declared_entry() {
        assert_eq!(stage_at(OVERLAPPING, 0.15), Some("Narrow"));
        assert_eq!(stage_at(OVERLAPPING, 0.05), Some("Wide"));
        assert_eq!(stage_at(OVERLAPPING, 0.25), Some("Wide"));
    }

    #[test]
    fn low_bound_is_inclusive_high_bound_exclusive() {
        assert_eq!(stage_at(OVERLAPPING, 0.10), Some("Narrow"));
        assert_eq!(stage_at(OVERLAPPING, 0.20), Some("Wide"));
        assert_eq!(stage_at(OVERLAPPING, 1.00), None);
    }

    #[test]
    fn bench_table_overlap_prefers_first_stage_ok() {
        assert_eq!(stage_at(BENCH_TABLE, 0.2), Some("1st Stage Boot OK"));
        assert_eq!(stage_at(BENCH_TABLE, 0.25), Some("Stuck First Stage"));
        assert_eq!(stage_at(BENCH_TABLE, 0.135), Some("Failing 2nd Stage"));
        assert_eq!(stage_at(BENCH_TABLE, 0.110), Some("Stuck First Stage"));
    }

    #[test]
    fn gaps_between_entries_have_no_match() {
        assert_eq!(stage_at(BATTERY_TABLE, 0.10), None);
        assert_eq!(stage_at(BYPASS_TABLE, 0.095), None);
        assert_eq!(stage_at(NO_BATTERY_TABLE, 0.37), None);
    }

    #[test]
    fn table_boundaries_hand_off_to_next_entry() {
        assert_eq!(stage_at(BATTERY_TABLE, 0.005), Some("Sleep Mode"));
        assert_eq!(stage_at(BYPASS_TABLE, 0.120), Some("eMMC Corruption"));
        assert_eq!(stage_at(NO_BATTERY_TABLE, 5.0), None);
    }

    #[test]
    fn every_table_is_well_formed() {
        for table in [BATTERY_TABLE, BENCH_TABLE, BYPASS_TABLE, NO_BATTERY_TABLE] {
            assert!(!table.is_empty());
            for e in table {
                assert!(e.low < e.high, "{} has an empty interval", e.verdict.stage);
                assert!(!e.verdict.stage.is_empty());
                assert!(!e.verdict.fault.is_empty());
            }
        }
    }
}
