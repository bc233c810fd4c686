//! Acceptable range for a single vital sign.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Inclusive acceptable interval for one named vital.
///
/// A missing bound means the range is open on that side. Instances can only
/// be created through [`VitalRange::new`] (or deserialization, which runs
/// the same checks), so every range in circulation satisfies `min <= max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVitalRange")]
pub struct VitalRange {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    unit: String,
}

/// Unvalidated wire form of a [`VitalRange`].
#[derive(Debug, Deserialize)]
struct RawVitalRange {
    name: String,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    unit: String,
}

impl TryFrom<RawVitalRange> for VitalRange {
    type Error = CoreError;

    fn try_from(raw: RawVitalRange) -> Result<Self, Self::Error> {
        VitalRange::new(raw.name, raw.min, raw.max, raw.unit)
    }
}

impl VitalRange {
    /// Build a validated range.
    ///
    /// Rejects empty names, non-finite bounds and `min > max`.
    pub fn new(
        name: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
        unit: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::EmptyName);
        }
        if min.is_some_and(|v| !v.is_finite()) || max.is_some_and(|v| !v.is_finite()) {
            return Err(CoreError::NonFiniteBound { name });
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(CoreError::InvalidRange { name, min, max });
            }
        }
        Ok(Self {
            name,
            min,
            max,
            unit: unit.into(),
        })
    }

    /// Shorthand for a range bounded on both sides.
    pub fn bounded(
        name: impl Into<String>,
        min: f64,
        max: f64,
        unit: impl Into<String>,
    ) -> Result<Self, CoreError> {
        Self::new(name, Some(min), Some(max), unit)
    }

    /// Shorthand for a range with only a floor.
    pub fn at_least(
        name: impl Into<String>,
        min: f64,
        unit: impl Into<String>,
    ) -> Result<Self, CoreError> {
        Self::new(name, Some(min), None, unit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Copy of this range with a different floor, validated again.
    pub fn with_min(&self, min: Option<f64>) -> Result<Self, CoreError> {
        Self::new(self.name.clone(), min, self.max, self.unit.clone())
    }

    /// Copy of this range with a different ceiling, validated again.
    pub fn with_max(&self, max: Option<f64>) -> Result<Self, CoreError> {
        Self::new(self.name.clone(), self.min, max, self.unit.clone())
    }
}
