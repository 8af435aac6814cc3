//! Voltage-driven special cases evaluated before the range table.
//!
//! Some verdicts depend on the supply voltage rather than the current draw
//! (an undervolted charger, a bench supply set far too high). Every rule
//! needs a known voltage; readings without one never trigger an override.

use crate::diagnostics::Verdict;
use crate::reading::Reading;
use crate::severity::Severity;
use crate::test_method::TestMethod;

/// A method-scoped predicate over `(volts, amps)` with the verdict it forces.
#[derive(Debug, Clone, Copy)]
pub struct OverrideRule {
    pub method: TestMethod,
    pub applies: fn(volts: f64, amps: f64) -> bool,
    pub verdict: Verdict,
}

pub const HEALTHY_15V_IDLE: Verdict = Verdict {
    stage: "15V Healthy Idle",
    fault: "None (PD 15V Negotiated)",
    action: "USB-C PD negotiated 15V and the board idles normally. Nothing to fix on the charge path.",
    severity: Severity::None,
};

pub const VBUS_UNDERVOLTAGE: Verdict = Verdict {
    stage: "VBUS Undervoltage",
    fault: "Charger or USB-C PD Negotiation",
    action: "VBUS is below 4.5V. Try a known-good charger, then check the USB-C port and M92T36.",
    severity: Severity::Critical,
};

pub const BENCH_OVERVOLTAGE: Verdict = Verdict {
    stage: "High Voltage on Bench Input",
    fault: "Bench Supply Set Too High",
    action: "Bench input must sit around 4.2V. Lower the supply before continuing.",
    severity: Severity::High,
};

pub const VSYS_OVERVOLTAGE: Verdict = Verdict {
    stage: "High Voltage on VSYS",
    fault: "Overvoltage on Bypass Injection",
    action: "Disconnect now. More than 5V on VSYS can kill the BQ24193 and Tegra rails.",
    severity: Severity::Critical,
};

/// Override rules in evaluation order. Within a method, the first rule
/// whose predicate holds wins.
///
/// `no_battery` readings between 4.0V and 6.0V have no rule of their own
/// and fall through to the range table.
pub const OVERRIDE_RULES: &[OverrideRule] = &[
    OverrideRule {
        method: TestMethod::NoBattery,
        applies: |volts, amps| volts >= 12.0 && amps <= 0.08,
        verdict: HEALTHY_15V_IDLE,
    },
    OverrideRule {
        method: TestMethod::NoBattery,
        applies: |volts, _| volts < 4.5,
        verdict: VBUS_UNDERVOLTAGE,
    },
    OverrideRule {
        method: TestMethod::Bench,
        applies: |volts, _| volts > 5.0,
        verdict: BENCH_OVERVOLTAGE,
    },
    OverrideRule {
        method: TestMethod::Battery,
        applies: |volts, _| volts < 4.5,
        verdict: VBUS_UNDERVOLTAGE,
    },
    OverrideRule {
        method: TestMethod::Battery,
        applies: |volts, amps| volts > 12.0 && amps <= 0.08,
        verdict: HEALTHY_15V_IDLE,
    },
    OverrideRule {
        method: TestMethod::Bypass,
        applies: |volts, _| volts > 5.0,
        verdict: VSYS_OVERVOLTAGE,
    },
];

/// Find the first override for `method` that fires on `reading`.
pub fn find_override<'a>(
    rules: &'a [OverrideRule],
    method: TestMethod,
    reading: &Reading,
) -> Option<&'a OverrideRule> {
    let volts = reading.volts?;
    rules
        .iter()
        .filter(|rule| rule.method == method)
        .find(|rule| (rule.applies)(volts, reading.amps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(method: TestMethod, volts: Option<f64>, amps: f64) -> Option<&'static str> {
        find_override(OVERRIDE_RULES, method, &Reading { volts, amps }).map(|r| r.verdict.stage)
    }

    #[test]
    fn unknown_voltage_never_overrides() {
        for method in crate::test_method::ALL_TEST_METHODS {
            assert_eq!(fired(*method, None, 0.0), None);
            assert_eq!(fired(*method, None, 10.0), None);
        }
    }

    #[test]
    fn no_battery_healthy_idle_includes_12v() {
        assert_eq!(fired(TestMethod::NoBattery, Some(12.0), 0.08), Some("15V Healthy Idle"));
        assert_eq!(fired(TestMethod::NoBattery, Some(12.0), 0.09), None);
    }

    #[test]
    fn battery_healthy_idle_excludes_12v() {
        assert_eq!(fired(TestMethod::Battery, Some(12.0), 0.01), None);
        assert_eq!(fired(TestMethod::Battery, Some(12.1), 0.01), Some("15V Healthy Idle"));
    }

    #[test]
    fn undervoltage_on_battery_and_no_battery() {
        assert_eq!(fired(TestMethod::Battery, Some(4.4), 0.5), Some("VBUS Undervoltage"));
        assert_eq!(fired(TestMethod::NoBattery, Some(0.0), 0.0), Some("VBUS Undervoltage"));
        assert_eq!(fired(TestMethod::NoBattery, Some(4.5), 0.0), None);
    }

    #[test]
    fn no_battery_mid_band_falls_through() {
        assert_eq!(fired(TestMethod::NoBattery, Some(5.0), 0.02), None);
    }

    #[test]
    fn bench_and_bypass_overvoltage() {
        assert_eq!(fired(TestMethod::Bench, Some(5.1), 0.2), Some("High Voltage on Bench Input"));
        assert_eq!(fired(TestMethod::Bench, Some(5.0), 0.2), None);
        assert_eq!(fired(TestMethod::Bypass, Some(9.0), 0.0), Some("High Voltage on VSYS"));
        assert_eq!(fired(TestMethod::Bypass, Some(4.2), 0.0), None);
    }

    #[test]
    fn bench_has_no_undervoltage_rule() {
        assert_eq!(fired(TestMethod::Bench, Some(3.0), 0.2), None);
    }
}
