//! Alert notification capability.
//!
//! [`AlertSink`] is the only seam between the evaluator and the outside
//! world. Concrete console, bus and webhook sinks live in the
//! `vitalwatch-events` crate; this module carries the trait plus the two
//! sinks that need no I/O.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::vitals::VitalVerdict;

/// Receives the failing verdicts of an evaluation pass.
///
/// Called at most once per pass, and only when at least one verdict failed.
/// Implementations must return promptly: long-running effects (animations,
/// network calls) belong on a background thread or task. A sink has no way
/// to alter the evaluation result it is reporting on.
pub trait AlertSink: Send + Sync {
    fn notify(&self, failing: &[VitalVerdict]);
}

impl<S: AlertSink + ?Sized> AlertSink for &S {
    fn notify(&self, failing: &[VitalVerdict]) {
        (**self).notify(failing);
    }
}

impl<S: AlertSink + ?Sized> AlertSink for Box<S> {
    fn notify(&self, failing: &[VitalVerdict]) {
        (**self).notify(failing);
    }
}

impl<S: AlertSink + ?Sized> AlertSink for Arc<S> {
    fn notify(&self, failing: &[VitalVerdict]) {
        (**self).notify(failing);
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAlertSink;

impl AlertSink for NoopAlertSink {
    fn notify(&self, _failing: &[VitalVerdict]) {}
}

/// Records every notification for later inspection.
#[derive(Debug, Default)]
pub struct RecordingAlertSink {
    calls: Mutex<Vec<Vec<VitalVerdict>>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded calls, oldest first.
    pub fn calls(&self) -> Vec<Vec<VitalVerdict>> {
        self.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    /// Failing verdicts from the most recent call, if any.
    pub fn last(&self) -> Option<Vec<VitalVerdict>> {
        self.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Vec<VitalVerdict>>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AlertSink for RecordingAlertSink {
    fn notify(&self, failing: &[VitalVerdict]) {
        self.lock().push(failing.to_vec());
    }
}
