//! Small composable sinks.

use vitalwatch_core::{AlertSink, VitalVerdict};

/// Logs one `tracing` error event per failing verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn notify(&self, failing: &[VitalVerdict]) {
        for verdict in failing {
            tracing::error!(
                vital = %verdict.name,
                value = verdict.value,
                status = %verdict.status,
                reason = %verdict.reason,
                "Vital sign alert",
            );
        }
    }
}

/// Forwards each notification to several sinks, in insertion order.
#[derive(Default)]
pub struct FanoutAlertSink {
    sinks: Vec<Box<dyn AlertSink>>,
}

impl FanoutAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl AlertSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn push(&mut self, sink: Box<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl AlertSink for FanoutAlertSink {
    fn notify(&self, failing: &[VitalVerdict]) {
        for sink in &self.sinks {
            sink.notify(failing);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vitalwatch_core::{Reading, RecordingAlertSink, ThresholdRegistry, VitalsEvaluator};

    use super::*;

    #[test]
    fn fanout_reaches_every_sink_once() {
        let first = Arc::new(RecordingAlertSink::new());
        let second = Arc::new(RecordingAlertSink::new());
        let fanout = FanoutAlertSink::new()
            .with(Arc::clone(&first))
            .with(TracingAlertSink)
            .with(Arc::clone(&second));
        assert_eq!(fanout.len(), 3);

        VitalsEvaluator::new(fanout).evaluate(
            &ThresholdRegistry::standard(),
            &[Reading::new("pulseRate", 130.0), Reading::new("pulseRate", 72.0)],
        );

        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
        assert_eq!(first.calls(), second.calls());
    }

    #[test]
    fn empty_fanout_is_harmless() {
        let fanout = FanoutAlertSink::new();
        assert!(fanout.is_empty());
        fanout.notify(&[]);
    }
}
