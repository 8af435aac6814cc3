//! Ordinal urgency tag attached to diagnostic verdicts.

use serde::{Deserialize, Serialize};

/// How urgently a diagnostic verdict needs a technician's attention.
///
/// Variants are declared in ascending order so `Ord` compares urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_urgency() {
        assert!(Severity::None < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_value(Severity::Critical).unwrap();
        assert_eq!(json, "critical");
        let parsed: Severity = serde_json::from_value(serde_json::json!("none")).unwrap();
        assert_eq!(parsed, Severity::None);
    }
}
