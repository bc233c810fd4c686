//! Built-in demonstration scenarios.

use vitalwatch_core::vital_names::{UNIT_PERCENT, VITAL_PULSE_RATE, VITAL_SPO2, VITAL_TEMPERATURE};
use vitalwatch_core::{CoreError, Reading, ThresholdRegistry, VitalRange};

/// SpO2 floor used for the cohort-specific scenario.
const COHORT_SPO2_FLOOR: f64 = 92.0;

/// A named reading set and the registry it is evaluated against.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub title: &'static str,
    pub readings: Vec<Reading>,
    pub registry: ThresholdRegistry,
}

fn vitals(temperature: f64, pulse: f64, spo2: f64) -> Vec<Reading> {
    vec![
        Reading::new(VITAL_TEMPERATURE, temperature),
        Reading::new(VITAL_PULSE_RATE, pulse),
        Reading::new(VITAL_SPO2, spo2),
    ]
}

/// Registry derived from `base` with the SpO2 floor raised to 92 %.
pub fn cohort_registry(base: &ThresholdRegistry) -> Result<ThresholdRegistry, CoreError> {
    let spo2 = match base.lookup(VITAL_SPO2) {
        Ok(range) => range.with_min(Some(COHORT_SPO2_FLOOR))?,
        Err(_) => VitalRange::at_least(VITAL_SPO2, COHORT_SPO2_FLOOR, UNIT_PERCENT)?,
    };
    Ok(base.with_override(spo2))
}

/// The nine demonstration cases, evaluated against `base` except for the
/// last one, which uses [`cohort_registry`].
pub fn demo_scenarios(base: &ThresholdRegistry) -> Result<Vec<Scenario>, CoreError> {
    let standard = |title, readings| Scenario {
        title,
        readings,
        registry: base.clone(),
    };

    Ok(vec![
        standard("All Vitals OK", vitals(98.6, 75.0, 97.0)),
        standard("Temperature Low", vitals(94.0, 80.0, 96.0)),
        standard("Temperature High", vitals(103.0, 80.0, 96.0)),
        standard("Pulse Rate Low", vitals(98.0, 55.0, 98.0)),
        standard("Pulse Rate High", vitals(98.0, 105.0, 98.0)),
        standard("SpO2 Low", vitals(98.5, 70.0, 89.0)),
        standard("Multiple Vitals Critical", vitals(94.0, 110.0, 85.0)),
        standard(
            "Unknown Vital",
            vec![
                Reading::new(VITAL_TEMPERATURE, 98.6),
                Reading::new("respirationRate", 15.0),
                Reading::new(VITAL_SPO2, 97.0),
            ],
        ),
        Scenario {
            title: "Raised SpO2 Floor For Patient Cohort",
            readings: vitals(98.0, 75.0, 91.0),
            registry: cohort_registry(base)?,
        },
    ])
}
