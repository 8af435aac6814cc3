//! Reading classification: parser, then overrides, then range lookup.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::diagnostics::overrides::find_override;
use crate::diagnostics::tables::lookup;
use crate::diagnostics::Verdict;
use crate::reading::parse_reading;
use crate::rulebook::{Rulebook, RULEBOOK};
use crate::severity::Severity;
use crate::test_method::TestMethod;

/// Returned when neither an override nor a range entry matches.
pub const UNKNOWN_BEHAVIOR: Verdict = Verdict {
    stage: "Unknown Behavior",
    fault: "Unrecognized Amp Draw",
    action: "Reading does not match a known boot stage. Re-measure and compare against a known-good board.",
    severity: Severity::Medium,
};

/// Which rule produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Override,
    RangeTable,
    Fallback,
}

/// Full output of a reading classification.
///
/// `amps`, `volts` and `method_used` always reflect the parsed input and
/// the table actually consulted, never values copied from a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    pub stage: String,
    pub fault: String,
    pub action: String,
    pub severity: Severity,
    pub amps: f64,
    pub volts: Option<f64>,
    pub method_used: TestMethod,
    pub matched_by: MatchSource,
}

impl DiagnosticResult {
    /// One-line technician note, e.g.
    /// `[2024-05-01 14:03] Diagnostic: Sleep Mode - Likely Fault: None (Normal)`.
    pub fn note_line(&self, at: NaiveDateTime) -> String {
        format!(
            "[{}] Diagnostic: {} - Likely Fault: {}",
            at.format("%Y-%m-%d %H:%M"),
            self.stage,
            self.fault
        )
    }
}

/// Classify a reading against the process-wide rulebook.
pub fn classify_reading(text: &str, method: TestMethod) -> DiagnosticResult {
    classify_reading_with(&RULEBOOK, text, method)
}

/// Classify a reading with a method given by name.
///
/// Unrecognised names fall back to the `battery` table.
pub fn classify_reading_named(text: &str, method: &str) -> DiagnosticResult {
    classify_reading(text, TestMethod::resolve_or_default(method))
}

/// Classify a reading against an explicit rulebook.
pub fn classify_reading_with(
    rulebook: &Rulebook,
    text: &str,
    method: TestMethod,
) -> DiagnosticResult {
    let reading = parse_reading(text);

    let (verdict, matched_by) =
        if let Some(rule) = find_override(rulebook.overrides, method, &reading) {
            (rule.verdict, MatchSource::Override)
        } else if let Some(entry) = lookup(rulebook.range_table(method), reading.amps) {
            (entry.verdict, MatchSource::RangeTable)
        } else {
            (UNKNOWN_BEHAVIOR, MatchSource::Fallback)
        };

    DiagnosticResult {
        stage: verdict.stage.to_string(),
        fault: verdict.fault.to_string(),
        action: verdict.action.to_string(),
        severity: verdict.severity,
        amps: reading.amps,
        volts: reading.volts,
        method_used: method,
        matched_by,
    }
}
