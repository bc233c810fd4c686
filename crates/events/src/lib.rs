//! Alert delivery for vitalwatch.
//!
//! Concrete [`vitalwatch_core::AlertSink`] implementations:
//!
//! - [`ConsoleAlertSink`]: banner, per-vital lines and a blinking
//!   animation on a background thread.
//! - [`BusAlertSink`]: publishes [`AlertEvent`]s on an in-process
//!   [`AlertBus`] backed by `tokio::sync::broadcast`.
//! - [`WebhookAlertSink`]: pages an external endpoint with retry.
//! - [`TracingAlertSink`] and [`FanoutAlertSink`]: logging and composition.

pub mod bus;
pub mod console;
pub mod delivery;
pub mod sinks;

pub use bus::{AlertBus, AlertEvent, BusAlertSink};
pub use console::{BlinkConfig, ConsoleAlertSink};
pub use delivery::webhook::{WebhookAlertSink, WebhookDelivery, WebhookError};
pub use sinks::{FanoutAlertSink, TracingAlertSink};
