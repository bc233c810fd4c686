//! `vitalwatch-core` -- threshold evaluation for patient vital signs.
//!
//! - [`vitals::ThresholdRegistry`] maps vital names to acceptable ranges.
//! - [`vitals::VitalsEvaluator`] checks reading sets and reports every
//!   out-of-range value.
//! - [`alert::AlertSink`] is notified once per failing evaluation.

pub mod alert;
pub mod error;
pub mod vital_names;
pub mod vitals;

pub use alert::{AlertSink, NoopAlertSink, RecordingAlertSink};
pub use error::CoreError;
pub use vitals::{
    EvaluationMode, EvaluationResult, Reading, ThresholdRegistry, VitalRange, VitalStatus,
    VitalVerdict, VitalsEvaluator,
};
