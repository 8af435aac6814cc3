//! USB-C port pin check (diode mode) analysis.
//!
//! Technicians probe the 24 pins of a USB-C breakout in diode mode and
//! record `OL`, `GND`, `SHORT` or a voltage drop per pin. This module turns
//! those readings into a summary and a list of likely faults.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;
use crate::serial::DeviceType;

/// Pins are numbered 1..=24 on the breakout board.
pub const PIN_COUNT: u8 = 24;

/// A diode-mode drop above zero but below this is treated as a short.
pub const SHORT_THRESHOLD_VOLTS: f64 = 0.150;

/// This many open pins means the port is gone, not individual traces.
pub const RIPPED_OFF_OPEN_PINS: usize = 20;

/// Pins that read OL on a healthy console port.
pub const CONSOLE_EXPECTED_OPEN: &[u8] = &[2, 3, 10, 11, 14, 15, 22, 23];

/// Pins that read OL on a healthy dock input port (only VBUS/GND connect).
pub const DOCK_EXPECTED_OPEN: &[u8] = &[2, 3, 5, 6, 7, 8, 10, 11, 14, 15, 17, 18, 19, 20, 22, 23];

pub const GND_PINS: &[u8] = &[1, 12, 13, 24];
pub const VBUS_PINS: &[u8] = &[4, 9, 16, 21];
pub const CC_SHORT_PINS: &[u8] = &[5, 17];
pub const CC_OPEN_PINS: &[u8] = &[5, 20];
pub const DATA_PINS: &[u8] = &[6, 7, 18, 19];
pub const SBU_PINS: &[u8] = &[8, 17];

pub const FINDING_RIPPED_OFF: &str = "USB-C Port likely Ripped Off / Disconnected";
pub const FINDING_CC_SHORT: &str = "Potential M92 IC Short (CC Lines - Pin 5/17)";
pub const FINDING_DATA_OPEN: &str =
    "Likely Broken Traces / Pads at USB-C Connector (Data Lines OL)";
pub const FINDING_CC_OPEN: &str = "Check M92 IC / USB-C Port (CC Lines OL)";
pub const FINDING_SBU_OPEN: &str = "Check P13USB / Filters (SBU Lines OL)";
pub const FINDING_VBUS_SHORT: &str = "VBUS Short (Check M92 / BQ / Caps)";

static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)").expect("valid regex"));

/// A single pin reading.
#[derive(Debug, Clone, PartialEq)]
pub enum PinValue {
    /// Open line.
    Open,
    Ground,
    Short,
    /// Diode-mode voltage drop.
    Volts(f64),
    /// Anything else the technician typed.
    Other(String),
}

impl PinValue {
    /// Case-insensitive parse. Numeric text only needs a leading number
    /// (`0.52V` reads as 0.52).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "OL" => PinValue::Open,
            "GND" => PinValue::Ground,
            "SHORT" => PinValue::Short,
            _ => LEADING_NUMBER_RE
                .find(trimmed)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .map_or_else(|| PinValue::Other(trimmed.to_string()), PinValue::Volts),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PinValue::Open)
    }

    pub fn is_short(&self) -> bool {
        match self {
            PinValue::Short => true,
            PinValue::Volts(v) => *v > 0.0 && *v < SHORT_THRESHOLD_VOLTS,
            _ => false,
        }
    }
}

impl std::fmt::Display for PinValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinValue::Open => f.write_str("OL"),
            PinValue::Ground => f.write_str("GND"),
            PinValue::Short => f.write_str("SHORT"),
            PinValue::Volts(v) => write!(f, "{v:.2}"),
            PinValue::Other(raw) => f.write_str(raw),
        }
    }
}

/// Readings keyed by pin number.
pub type PinReadings = BTreeMap<u8, PinValue>;

/// Parse `{"1": "GND", "2": "OL", ...}` style input. Blank values are
/// skipped; keys must be pin numbers 1..=24.
pub fn parse_pin_map<'a, I>(entries: I) -> Result<PinReadings, CoreError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut readings = PinReadings::new();
    for (key, value) in entries {
        let pin = parse_pin_number(key)?;
        if value.trim().is_empty() {
            continue;
        }
        readings.insert(pin, PinValue::parse(value));
    }
    Ok(readings)
}

fn parse_pin_number(key: &str) -> Result<u8, CoreError> {
    key.trim()
        .parse::<u8>()
        .ok()
        .filter(|pin| (1..=PIN_COUNT).contains(pin))
        .ok_or_else(|| {
            CoreError::Validation(format!("Pin '{key}' must be a number from 1 to {PIN_COUNT}"))
        })
}

/// What a unit's stored `pin_check` field holds.
///
/// Newer records store a JSON object of readings; older ones hold a free
/// text note that is shown as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredPinCheck {
    Empty,
    Readings(PinReadings),
    Legacy(String),
}

impl StoredPinCheck {
    pub fn parse(stored: &str) -> Self {
        let trimmed = stored.trim();
        if trimmed.is_empty() {
            return StoredPinCheck::Empty;
        }
        let Ok(map) = serde_json::from_str::<BTreeMap<String, serde_json::Value>>(trimmed) else {
            return StoredPinCheck::Legacy(trimmed.to_string());
        };
        match parse_pin_json(&map) {
            Ok(readings) => StoredPinCheck::Readings(readings),
            Err(_) => StoredPinCheck::Legacy(trimmed.to_string()),
        }
    }
}

/// Parse a JSON pin map whose values are strings (`"OL"`, `"0.52"`) or bare
/// numbers (`0.52`). Other JSON values carry no reading and are skipped.
pub fn parse_pin_json(
    map: &BTreeMap<String, serde_json::Value>,
) -> Result<PinReadings, CoreError> {
    let values: Vec<(&str, String)> = map
        .iter()
        .filter_map(|(k, v)| match v {
            serde_json::Value::String(s) => Some((k.as_str(), s.clone())),
            serde_json::Value::Number(n) => Some((k.as_str(), n.to_string())),
            _ => None,
        })
        .collect();
    parse_pin_map(values.iter().map(|(k, v)| (*k, v.as_str())))
}

/// Summary of a pin check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinReport {
    pub open_count: usize,
    pub ripped_off: bool,
    /// OL pins that should have conducted.
    pub unexpected_open: Vec<u8>,
    /// Shorted pins that are not OL.
    pub shorted: Vec<u8>,
    pub findings: Vec<&'static str>,
    /// At least one reading and nothing abnormal.
    pub all_ok: bool,
}

pub fn expected_open(device: DeviceType) -> &'static [u8] {
    match device {
        DeviceType::Dock => DOCK_EXPECTED_OPEN,
        _ => CONSOLE_EXPECTED_OPEN,
    }
}

/// Analyze a set of readings for a console (or anything that is not a dock)
/// or a dock.
pub fn analyze(readings: &PinReadings, device: DeviceType) -> PinReport {
    let expected = expected_open(device);
    let open_count = readings.values().filter(|v| v.is_open()).count();
    let ripped_off = open_count >= RIPPED_OFF_OPEN_PINS;

    let unexpected_open: Vec<u8> = readings
        .iter()
        .filter(|(pin, v)| v.is_open() && !expected.contains(*pin))
        .map(|(pin, _)| *pin)
        .collect();
    let shorted: Vec<u8> = readings
        .iter()
        .filter(|(_, v)| v.is_short())
        .map(|(pin, _)| *pin)
        .collect();

    let any = |pins: &[u8], pred: fn(&PinValue) -> bool| {
        pins.iter().any(|p| readings.get(p).is_some_and(pred))
    };

    let mut findings = Vec::new();
    if ripped_off {
        findings.push(FINDING_RIPPED_OFF);
    } else {
        if any(CC_SHORT_PINS, PinValue::is_short) {
            findings.push(FINDING_CC_SHORT);
        }
        // Data, CC and SBU lines are not wired on a dock input port.
        if device != DeviceType::Dock {
            if any(DATA_PINS, PinValue::is_open) {
                findings.push(FINDING_DATA_OPEN);
            }
            if any(CC_OPEN_PINS, PinValue::is_open) {
                findings.push(FINDING_CC_OPEN);
            }
            if any(SBU_PINS, PinValue::is_open) {
                findings.push(FINDING_SBU_OPEN);
            }
        }
        if any(VBUS_PINS, PinValue::is_short) {
            findings.push(FINDING_VBUS_SHORT);
        }
    }

    let all_ok = !readings.is_empty()
        && !ripped_off
        && unexpected_open.is_empty()
        && shorted.is_empty()
        && findings.is_empty();

    PinReport {
        open_count,
        ripped_off,
        unexpected_open,
        shorted,
        findings,
        all_ok,
    }
}

/// Known-good readings for a healthy port.
pub fn reference_readings(device: DeviceType) -> PinReadings {
    if device == DeviceType::Dock {
        return (1..=PIN_COUNT)
            .map(|pin| {
                let value = if GND_PINS.contains(&pin) {
                    PinValue::Ground
                } else if VBUS_PINS.contains(&pin) {
                    PinValue::Volts(0.54)
                } else {
                    PinValue::Open
                };
                (pin, value)
            })
            .collect();
    }

    const CONSOLE: [&str; 24] = [
        "GND", "OL", "OL", "0.52", "0.54", "0.80", "0.81", "0.75", "0.52", "OL", "OL", "GND",
        "GND", "OL", "OL", "0.52", "0.75", "0.81", "0.80", "0.54", "0.52", "OL", "OL", "GND",
    ];
    (1..=PIN_COUNT)
        .zip(CONSOLE)
        .map(|(pin, raw)| (pin, PinValue::parse(raw)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(pairs: &[(u8, &str)]) -> PinReadings {
        pairs.iter().map(|(p, v)| (*p, PinValue::parse(v))).collect()
    }

    #[test]
    fn parses_pin_values() {
        assert_eq!(PinValue::parse("ol"), PinValue::Open);
        assert_eq!(PinValue::parse(" Gnd "), PinValue::Ground);
        assert_eq!(PinValue::parse("short"), PinValue::Short);
        assert_eq!(PinValue::parse("0.52"), PinValue::Volts(0.52));
        assert_eq!(PinValue::parse("0.52V"), PinValue::Volts(0.52));
        assert_eq!(PinValue::parse("beep"), PinValue::Other("beep".into()));
    }

    #[test]
    fn short_detection() {
        assert!(PinValue::parse("SHORT").is_short());
        assert!(PinValue::parse("0.012").is_short());
        assert!(!PinValue::parse("0.000").is_short());
        assert!(!PinValue::parse("0.150").is_short());
        assert!(!PinValue::parse("OL").is_short());
        assert!(!PinValue::parse("GND").is_short());
    }

    #[test]
    fn reference_console_port_is_ok() {
        let report = analyze(&reference_readings(DeviceType::Console), DeviceType::Console);
        assert!(report.all_ok);
        assert_eq!(report.open_count, 8);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn reference_dock_port_is_ok() {
        let report = analyze(&reference_readings(DeviceType::Dock), DeviceType::Dock);
        assert!(report.all_ok, "{report:?}");
        assert_eq!(report.open_count, 16);
    }

    #[test]
    fn dock_readings_on_a_console_flag_open_lines() {
        let report = analyze(&reference_readings(DeviceType::Dock), DeviceType::Console);
        assert!(!report.all_ok);
        assert_eq!(report.unexpected_open, vec![5, 6, 7, 8, 17, 18, 19, 20]);
        assert_eq!(
            report.findings,
            vec![FINDING_DATA_OPEN, FINDING_CC_OPEN, FINDING_SBU_OPEN]
        );
    }

    #[test]
    fn ripped_off_port_reports_single_finding() {
        let all_open: PinReadings = (1..=PIN_COUNT).map(|p| (p, PinValue::Open)).collect();
        let report = analyze(&all_open, DeviceType::Console);
        assert!(report.ripped_off);
        assert_eq!(report.findings, vec![FINDING_RIPPED_OFF]);
        assert!(!report.all_ok);
    }

    #[test]
    fn vbus_and_cc_shorts() {
        let mut r = reference_readings(DeviceType::Console);
        r.insert(9, PinValue::parse("0.01"));
        r.insert(17, PinValue::Short);
        let report = analyze(&r, DeviceType::Console);
        assert_eq!(report.shorted, vec![9, 17]);
        assert_eq!(report.findings, vec![FINDING_CC_SHORT, FINDING_VBUS_SHORT]);
    }

    #[test]
    fn empty_readings_are_not_ok() {
        let report = analyze(&PinReadings::new(), DeviceType::Console);
        assert!(!report.all_ok);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn partial_readings_only_judge_what_was_measured() {
        let report = analyze(&readings(&[(1, "GND"), (4, "0.52")]), DeviceType::Console);
        assert!(report.all_ok);
    }

    #[test]
    fn pin_map_rejects_out_of_range_keys() {
        assert!(parse_pin_map([("0", "OL")]).is_err());
        assert!(parse_pin_map([("25", "OL")]).is_err());
        assert!(parse_pin_map([("A5", "OL")]).is_err());
        let ok = parse_pin_map([("24", "GND"), ("3", " ")]).unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn stored_pin_check_variants() {
        assert_eq!(StoredPinCheck::parse(""), StoredPinCheck::Empty);
        assert_eq!(
            StoredPinCheck::parse("all pins fine"),
            StoredPinCheck::Legacy("all pins fine".into())
        );
        let StoredPinCheck::Readings(r) = StoredPinCheck::parse(r#"{"1":"GND","4":0.52}"#) else {
            panic!("expected readings");
        };
        assert_eq!(r.get(&1), Some(&PinValue::Ground));
        assert_eq!(r.get(&4), Some(&PinValue::Volts(0.52)));
        assert!(matches!(
            StoredPinCheck::parse(r#"{"99":"OL"}"#),
            StoredPinCheck::Legacy(_)
        ));
    }

    #[test]
    fn display_round_trips_keywords() {
        assert_eq!(PinValue::Open.to_string(), "OL");
        assert_eq!(PinValue::Volts(0.5).to_string(), "0.50");
    }

    #[test]
    fn json_pin_map_accepts_numbers() {
        let map: BTreeMap<String, serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "1": "GND",
                "4": 0.52,
                "5": 0.012,
                "6": null,
            }))
            .unwrap();
        let readings = parse_pin_json(&map).unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[&4], PinValue::Volts(0.52));
        assert!(readings[&5].is_short());
    }

    #[test]
    fn json_pin_map_rejects_bad_keys() {
        let map: BTreeMap<String, serde_json::Value> =
            serde_json::from_value(serde_json::json!({"0": 0.5})).unwrap();
        assert!(parse_pin_json(&map).is_err());
    }
}
