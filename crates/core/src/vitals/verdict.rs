//! Reading, verdict and result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single named measurement supplied at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub name: String,
    pub value: f64,
}

impl Reading {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Structured outcome of checking one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VitalStatus {
    /// Within the configured inclusive range.
    Normal,
    /// Strictly below the configured floor.
    TooLow { limit: f64 },
    /// Strictly above the configured ceiling.
    TooHigh { limit: f64 },
    /// No range is registered under the reading's name.
    Unknown,
    /// The reading value is NaN and cannot be compared.
    Invalid,
}

impl VitalStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Normal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::TooLow { .. } => "too low",
            Self::TooHigh { .. } => "too high",
            Self::Unknown => "unknown",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one [`Reading`] against its range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalVerdict {
    pub name: String,
    pub value: f64,
    /// Unit of the matching range; empty for unknown vitals.
    pub unit: String,
    pub ok: bool,
    pub status: VitalStatus,
    /// Human-readable explanation, e.g. `(94°F) is too low (expected >= 95°F).`
    pub reason: String,
}

/// Aggregate of all verdicts produced by one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// One verdict per evaluated reading, in input order.
    pub verdicts: Vec<VitalVerdict>,
    /// `true` iff every verdict is ok.
    pub all_ok: bool,
}

impl EvaluationResult {
    pub(crate) fn from_verdicts(verdicts: Vec<VitalVerdict>) -> Self {
        let all_ok = verdicts.iter().all(|v| v.ok);
        Self { verdicts, all_ok }
    }

    /// Failing verdicts in input order.
    pub fn failures(&self) -> impl Iterator<Item = &VitalVerdict> {
        self.verdicts.iter().filter(|v| !v.ok)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Render `value` followed by `unit`.
///
/// Symbolic units (`°F`, `%`) are attached directly; word units (`bpm`)
/// get a separating space.
pub fn format_with_unit(value: f64, unit: &str) -> String {
    match unit.chars().next() {
        None => format!("{value}"),
        Some(c) if c.is_alphanumeric() => format!("{value} {unit}"),
        Some(_) => format!("{value}{unit}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_with_symbolic_unit() {
        assert_eq!(format_with_unit(98.6, "°F"), "98.6°F");
        assert_eq!(format_with_unit(97.0, "%"), "97%");
    }

    #[test]
    fn format_with_word_unit() {
        assert_eq!(format_with_unit(75.0, "bpm"), "75 bpm");
    }

    #[test]
    fn format_without_unit() {
        assert_eq!(format_with_unit(15.0, ""), "15");
    }

    #[test]
    fn status_serializes_with_kind_tag() {
        let json = serde_json::to_value(VitalStatus::TooHigh { limit: 100.0 }).unwrap();
        assert_eq!(json["kind"], "too_high");
        assert_eq!(json["limit"], 100.0);
    }

    #[test]
    fn only_normal_is_ok() {
        assert!(VitalStatus::Normal.is_ok());
        assert!(!VitalStatus::TooLow { limit: 1.0 }.is_ok());
        assert!(!VitalStatus::Unknown.is_ok());
        assert!(!VitalStatus::Invalid.is_ok());
    }
}
