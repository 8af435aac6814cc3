//! Free-text electrical reading parser.
//!
//! Technicians type readings the way the meter shows them: `15V/0.003A`,
//! `200mA`, `5V 0.4A`, or just `0.19`. The parser tokenizes the text into
//! `{value, unit}` pairs and then assigns tokens to volts and amps by unit
//! tag. It never fails: anything it cannot decompose degrades to defaults.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A number immediately followed (optionally after whitespace) by a unit word.
pub const READING_TOKEN_PATTERN: &str = r"([0-9]*\.?[0-9]+)\s*([a-z]*)";

static READING_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(READING_TOKEN_PATTERN).expect("valid regex"));

/// A parsed reading. `amps` defaults to `0.0` when no current is present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reading {
    pub volts: Option<f64>,
    pub amps: f64,
}

/// Unit tag attached to a numeric token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Milliamps,
    Amps,
    Millivolts,
    Volts,
    /// No unit word followed the number.
    Bare,
    /// A unit word this parser does not understand (`w`, `ohm`, ...).
    Other,
}

impl Unit {
    fn from_word(word: &str) -> Self {
        if word.is_empty() {
            Unit::Bare
        } else if word.starts_with("ma") || word.starts_with("milliamp") {
            Unit::Milliamps
        } else if word.starts_with("mv") || word.starts_with("millivolt") {
            Unit::Millivolts
        } else if word.starts_with('a') {
            Unit::Amps
        } else if word.starts_with('v') {
            Unit::Volts
        } else {
            Unit::Other
        }
    }
}

/// A single numeric token with its unit tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub value: f64,
    pub unit: Unit,
}

impl Token {
    /// Value converted to amps, if this is a current token.
    fn as_amps(self) -> Option<f64> {
        match self.unit {
            Unit::Milliamps => Some(self.value / 1000.0),
            Unit::Amps => Some(self.value),
            _ => None,
        }
    }

    /// Value converted to volts, if this is a voltage token.
    fn as_volts(self) -> Option<f64> {
        match self.unit {
            Unit::Millivolts => Some(self.value / 1000.0),
            Unit::Volts => Some(self.value),
            _ => None,
        }
    }
}

/// Split normalized reading text into numeric tokens in textual order.
pub fn tokenize(text: &str) -> Vec<Token> {
    let normalized = text.trim().to_lowercase();
    READING_TOKEN_RE
        .captures_iter(&normalized)
        .filter_map(|caps| {
            let value: f64 = caps.get(1)?.as_str().parse().ok()?;
            let unit = Unit::from_word(caps.get(2).map_or("", |m| m.as_str()));
            Some(Token { value, unit })
        })
        .collect()
}

/// Parse a reading into `(volts, amps)`.
///
/// Pass 1 takes the first current-tagged token as amps and the first
/// voltage-tagged token as volts. Pass 2 runs only when no tagged current
/// was found: next to a voltage the first bare number is amps, so
/// `"15V 0.2"` reads as 0.2A; with no voltage at all the first number of
/// any non-voltage unit is amps (`"12w"` reads as 12A).
pub fn parse_reading(text: &str) -> Reading {
    let tokens = tokenize(text);

    let volts = tokens.iter().find_map(|t| t.as_volts());
    let amps = tokens
        .iter()
        .find_map(|t| t.as_amps())
        .or_else(|| {
            tokens
                .iter()
                .find(|t| match t.unit {
                    Unit::Bare => true,
                    Unit::Other => volts.is_none(),
                    _ => false,
                })
                .map(|t| t.value)
        })
        .unwrap_or(0.0);

    Reading { volts, amps }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(text: &str) -> (Option<f64>, f64) {
        let r = parse_reading(text);
        (r.volts, r.amps)
    }

    #[test]
    fn empty_input_defaults() {
        assert_eq!(pair(""), (None, 0.0));
        assert_eq!(pair("   "), (None, 0.0));
    }

    #[test]
    fn volts_and_amps_with_slash() {
        assert_eq!(pair("15V/0.003A"), (Some(15.0), 0.003));
    }

    #[test]
    fn milliamps_are_scaled() {
        assert_eq!(pair("200mA"), (None, 0.2));
        assert_eq!(pair("5v 350 ma"), (Some(5.0), 0.35));
    }

    #[test]
    fn bare_number_is_amps() {
        assert_eq!(pair("0.19"), (None, 0.19));
    }

    #[test]
    fn voltage_only_has_zero_amps() {
        assert_eq!(pair("15V"), (Some(15.0), 0.0));
        assert_eq!(pair("  5 volts "), (Some(5.0), 0.0));
    }

    #[test]
    fn bare_number_next_to_voltage_is_amps() {
        assert_eq!(pair("15V 0.2"), (Some(15.0), 0.2));
        assert_eq!(pair("0.45 @ 5v"), (Some(5.0), 0.45));
    }

    #[test]
    fn first_tagged_token_wins() {
        assert_eq!(pair("0.1A then 0.4A"), (None, 0.1));
        assert_eq!(pair("5V 15V 0.5A"), (Some(5.0), 0.5));
    }

    #[test]
    fn tagged_current_beats_earlier_bare_number() {
        assert_eq!(pair("3 0.25a"), (None, 0.25));
    }

    #[test]
    fn millivolts_are_scaled() {
        assert_eq!(pair("4200mV"), (Some(4.2), 0.0));
    }

    #[test]
    fn unknown_unit_number_is_amps_without_voltage() {
        assert_eq!(pair("12w"), (None, 12.0));
        assert_eq!(pair("0.3 ohm"), (None, 0.3));
        assert_eq!(pair("12w 0.3"), (None, 12.0));
    }

    #[test]
    fn tagged_current_beats_unknown_unit() {
        assert_eq!(pair("12w 0.3a"), (None, 0.3));
    }

    #[test]
    fn unknown_unit_next_to_voltage_is_not_amps() {
        assert_eq!(pair("15v 3ohm"), (Some(15.0), 0.0));
        assert_eq!(pair("15v 3ohm 0.2"), (Some(15.0), 0.2));
    }

    #[test]
    fn leading_dot_numbers_parse() {
        assert_eq!(pair(".5a"), (None, 0.5));
    }

    #[test]
    fn garbage_degrades_to_defaults() {
        assert_eq!(pair("no reading, port dead"), (None, 0.0));
    }

    #[test]
    fn tokenize_keeps_textual_order() {
        let tokens = tokenize("15V/0.003A");
        assert_eq!(
            tokens,
            vec![
                Token { value: 15.0, unit: Unit::Volts },
                Token { value: 0.003, unit: Unit::Amps },
            ]
        );
    }
}
