//! `vitalwatch-monitor` library crate.
//!
//! Configuration, threshold loading, reading parsing and report rendering
//! for the `vitalwatch-monitor` binary. Re-exported for integration tests.

pub mod config;
pub mod readings;
pub mod report;
pub mod scenarios;
pub mod thresholds;

use vitalwatch_core::EvaluationResult;

/// Process exit code when every reading is within range.
pub const EXIT_OK: u8 = 0;

/// Process exit code for configuration or argument errors.
pub const EXIT_USAGE: u8 = 1;

/// Process exit code when at least one reading failed.
pub const EXIT_ALERT: u8 = 2;

/// Exit code for a single evaluation.
pub fn exit_code(result: &EvaluationResult) -> u8 {
    if result.all_ok {
        EXIT_OK
    } else {
        EXIT_ALERT
    }
}
