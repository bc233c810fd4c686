//! In-process alert bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`AlertBus`] fans every [`AlertEvent`] out to all subscribers. It is
//! designed to be shared via `Arc<AlertBus>`; [`BusAlertSink`] is the
//! [`AlertSink`] adapter the evaluator talks to.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use vitalwatch_core::{AlertSink, VitalVerdict};

// ---------------------------------------------------------------------------
// AlertEvent
// ---------------------------------------------------------------------------

/// One failing evaluation pass, as published on the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Failing verdicts in the order the readings were supplied.
    pub failing: Vec<VitalVerdict>,

    /// When the alert was raised (UTC).
    pub raised_at: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(failing: Vec<VitalVerdict>) -> Self {
        Self {
            failing,
            raised_at: Utc::now(),
        }
    }

    /// Names of the failing vitals, in order.
    pub fn vital_names(&self) -> Vec<&str> {
        self.failing.iter().map(|v| v.name.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// AlertBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out alert bus.
///
/// ```rust
/// use vitalwatch_events::bus::{AlertBus, AlertEvent};
///
/// let bus = AlertBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(AlertEvent::new(Vec::new()));
/// ```
pub struct AlertBus {
    sender: broadcast::Sender<AlertEvent>,
}

impl AlertBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow receivers that fall more than `capacity` events behind observe
    /// a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that will see it; zero means the
    /// event was dropped.
    pub fn publish(&self, event: AlertEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for AlertBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// BusAlertSink
// ---------------------------------------------------------------------------

/// Publishes each failing evaluation on an [`AlertBus`].
#[derive(Clone)]
pub struct BusAlertSink {
    bus: Arc<AlertBus>,
}

impl BusAlertSink {
    pub fn new(bus: Arc<AlertBus>) -> Self {
        Self { bus }
    }
}

impl AlertSink for BusAlertSink {
    fn notify(&self, failing: &[VitalVerdict]) {
        let delivered = self.bus.publish(AlertEvent::new(failing.to_vec()));
        if delivered == 0 {
            tracing::debug!(failures = failing.len(), "Alert published with no subscribers");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
