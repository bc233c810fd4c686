//! Vital-sign threshold evaluation.
//!
//! Contains the range model, the threshold registry and the evaluation
//! engine. Nothing here performs I/O; alert delivery goes through
//! [`crate::alert::AlertSink`].

pub mod evaluator;
pub mod range;
pub mod registry;
pub mod verdict;

pub use evaluator::{check_reading, evaluate_readings, EvaluationMode, VitalsEvaluator};
pub use range::VitalRange;
pub use registry::ThresholdRegistry;
pub use verdict::{format_with_unit, EvaluationResult, Reading, VitalStatus, VitalVerdict};
