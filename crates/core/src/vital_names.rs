//! Well-known vital-sign names and units.
//!
//! These are the canonical keys used by the standard threshold
//! configuration, threshold files, and the command-line reading parser.

/// Body temperature.
pub const VITAL_TEMPERATURE: &str = "temperature";

/// Heart beats per minute.
pub const VITAL_PULSE_RATE: &str = "pulseRate";

/// Peripheral oxygen saturation.
pub const VITAL_SPO2: &str = "spo2";

pub const UNIT_FAHRENHEIT: &str = "°F";
pub const UNIT_BPM: &str = "bpm";
pub const UNIT_PERCENT: &str = "%";
