//! Plain-text rendering of evaluation results.
//!
//! The failure summary is not part of the report: the console alert sink
//! writes it together with the banner once the status lines are out.

use vitalwatch_core::EvaluationResult;

/// Closing line for a passing evaluation.
pub const ALL_NORMAL: &str = "All vital signs are within normal limits.";

/// One status line per reading, then [`ALL_NORMAL`] if nothing failed.
pub fn render_report(result: &EvaluationResult) -> String {
    let mut text = String::new();
    for verdict in &result.verdicts {
        text.push_str(&format!(
            "{}: {} {}\n",
            verdict.name, verdict.value, verdict.reason
        ));
    }

    if result.all_ok {
        text.push_str(&format!("\n{ALL_NORMAL}\n"));
    }
    text
}
