//! Named threshold configuration.
//!
//! A [`ThresholdRegistry`] is built once and never mutated afterwards.
//! Per-patient adjustments go through [`ThresholdRegistry::with_override`],
//! which returns a derived copy and leaves the receiver untouched, so a base
//! registry can be shared across threads while derived ones are in use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::vital_names::{
    UNIT_BPM, UNIT_FAHRENHEIT, UNIT_PERCENT, VITAL_PULSE_RATE, VITAL_SPO2, VITAL_TEMPERATURE,
};

use super::range::VitalRange;

/// Mapping from vital name (case-sensitive) to its acceptable range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<VitalRange>", into = "Vec<VitalRange>")]
pub struct ThresholdRegistry {
    ranges: BTreeMap<String, VitalRange>,
}

impl ThresholdRegistry {
    /// Bulk-load a registry from a collection of ranges.
    ///
    /// Each name may appear only once.
    pub fn from_ranges(ranges: impl IntoIterator<Item = VitalRange>) -> Result<Self, CoreError> {
        let mut map = BTreeMap::new();
        for range in ranges {
            let name = range.name().to_string();
            if map.contains_key(&name) {
                return Err(CoreError::DuplicateVital { name });
            }
            map.insert(name, range);
        }
        Ok(Self { ranges: map })
    }

    /// Standard adult configuration.
    ///
    /// | Vital         | Min | Max  | Unit |
    /// |---------------|-----|------|------|
    /// | `temperature` | 95  | 102  | °F   |
    /// | `pulseRate`   | 60  | 100  | bpm  |
    /// | `spo2`        | 90  | none | %    |
    pub fn standard() -> Self {
        let ranges = [
            (VITAL_TEMPERATURE, Some(95.0), Some(102.0), UNIT_FAHRENHEIT),
            (VITAL_PULSE_RATE, Some(60.0), Some(100.0), UNIT_BPM),
            (VITAL_SPO2, Some(90.0), None, UNIT_PERCENT),
        ]
        .into_iter()
        .map(|(name, min, max, unit)| {
            let range = VitalRange::new(name, min, max, unit).expect("valid standard range");
            (name.to_string(), range)
        })
        .collect();
        Self { ranges }
    }

    /// Exact-match lookup.
    pub fn lookup(&self, name: &str) -> Result<&VitalRange, CoreError> {
        self.ranges
            .get(name)
            .ok_or_else(|| CoreError::UnknownVital {
                name: name.to_string(),
            })
    }

    /// Return a copy of this registry in which `range.name()` maps to
    /// `range`. The entry is added if the name was not present before.
    #[must_use]
    pub fn with_override(&self, range: VitalRange) -> Self {
        let mut ranges = self.ranges.clone();
        ranges.insert(range.name().to_string(), range);
        Self { ranges }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ranges.contains_key(name)
    }

    /// Registered vital names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    pub fn ranges(&self) -> impl Iterator<Item = &VitalRange> {
        self.ranges.values()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl TryFrom<Vec<VitalRange>> for ThresholdRegistry {
    type Error = CoreError;

    fn try_from(ranges: Vec<VitalRange>) -> Result<Self, Self::Error> {
        Self::from_ranges(ranges)
    }
}

impl From<ThresholdRegistry> for Vec<VitalRange> {
    fn from(registry: ThresholdRegistry) -> Self {
        registry.ranges.into_values().collect()
    }
}
