//! Boot-stage diagnostics from a single electrical reading.
//!
//! A reading is parsed, checked against method-specific voltage overrides,
//! and otherwise looked up in the method's ordered range table. All logic in
//! this module is pure; the rule data lives in [`crate::rulebook`].

pub mod classifier;
pub mod overrides;
pub mod tables;

pub use classifier::{
    classify_reading, classify_reading_named, classify_reading_with, DiagnosticResult, MatchSource,
};

use serde::Serialize;

use crate::severity::Severity;

/// The human-facing part of a diagnosis: where the board is stuck, what is
/// most likely at fault, and what to do about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub stage: &'static str,
    pub fault: &'static str,
    pub action: &'static str,
    pub severity: Severity,
}
