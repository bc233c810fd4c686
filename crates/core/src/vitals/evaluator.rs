//! Vital-sign evaluation engine.
//!
//! Pure logic apart from the single [`AlertSink`] call on a failing pass.
//! The caller supplies the registry for every call; nothing is cached
//! between evaluations.

use serde::{Deserialize, Serialize};

use crate::alert::AlertSink;

use super::range::VitalRange;
use super::registry::ThresholdRegistry;
use super::verdict::{format_with_unit, EvaluationResult, Reading, VitalStatus, VitalVerdict};

/// How far an evaluation pass proceeds after a failing reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMode {
    /// Record a verdict for every reading.
    #[default]
    Aggregate,
    /// Stop after the first failing verdict. Kept for callers that expect
    /// the legacy single-failure report.
    StopAtFirstFailure,
}

/// Evaluates reading sets and notifies an [`AlertSink`] on failure.
#[derive(Debug, Clone, Default)]
pub struct VitalsEvaluator<S> {
    sink: S,
    mode: EvaluationMode,
}

impl<S: AlertSink> VitalsEvaluator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            mode: EvaluationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Evaluate `readings` against `registry`.
    ///
    /// When any verdict fails, the sink is notified exactly once with all
    /// failing verdicts in input order before this returns.
    pub fn evaluate(&self, registry: &ThresholdRegistry, readings: &[Reading]) -> EvaluationResult {
        let result = evaluate_readings(registry, readings, self.mode);

        if !result.all_ok {
            let failing: Vec<VitalVerdict> = result.failures().cloned().collect();
            tracing::warn!(
                failures = failing.len(),
                readings = readings.len(),
                "Vital signs out of range",
            );
            self.sink.notify(&failing);
        }

        result
    }
}

/// Evaluate `readings` without notifying anyone.
pub fn evaluate_readings(
    registry: &ThresholdRegistry,
    readings: &[Reading],
    mode: EvaluationMode,
) -> EvaluationResult {
    let mut verdicts = Vec::with_capacity(readings.len());

    for reading in readings {
        let verdict = check_reading(registry, reading);
        let failed = !verdict.ok;
        verdicts.push(verdict);

        if failed && mode == EvaluationMode::StopAtFirstFailure {
            break;
        }
    }

    EvaluationResult::from_verdicts(verdicts)
}

/// Check a single reading against its registered range.
///
/// Unknown vitals and out-of-range values are reported in the verdict,
/// never as errors.
pub fn check_reading(registry: &ThresholdRegistry, reading: &Reading) -> VitalVerdict {
    let verdict = match registry.lookup(&reading.name) {
        Ok(range) => check_against_range(range, reading.value),
        Err(err) => VitalVerdict {
            name: reading.name.clone(),
            value: reading.value,
            unit: String::new(),
            ok: false,
            status: VitalStatus::Unknown,
            reason: err.to_string(),
        },
    };

    tracing::debug!(
        vital = %verdict.name,
        value = verdict.value,
        status = %verdict.status,
        "Checked vital",
    );

    verdict
}

/// Compare `value` against `range`. The floor is checked first, so a
/// reading is never reported as both too low and too high.
fn check_against_range(range: &VitalRange, value: f64) -> VitalVerdict {
    let unit = range.unit();
    let shown = format_with_unit(value, unit);

    let (status, reason) = if value.is_nan() {
        (VitalStatus::Invalid, format!("({shown}) is not a number."))
    } else if let Some(min) = range.min().filter(|min| value < *min) {
        (
            VitalStatus::TooLow { limit: min },
            format!(
                "({shown}) is too low (expected >= {}).",
                format_with_unit(min, unit)
            ),
        )
    } else if let Some(max) = range.max().filter(|max| value > *max) {
        (
            VitalStatus::TooHigh { limit: max },
            format!(
                "({shown}) is too high (expected <= {}).",
                format_with_unit(max, unit)
            ),
        )
    } else {
        (VitalStatus::Normal, format!("({shown}) is OK."))
    };

    VitalVerdict {
        name: range.name().to_string(),
        value,
        unit: unit.to_string(),
        ok: status.is_ok(),
        status,
        reason,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
