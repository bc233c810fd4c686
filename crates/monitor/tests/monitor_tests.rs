//! Integration tests for threshold loading and the command-line flow.

use std::io::Write;

use assert_matches::assert_matches;
use tempfile::NamedTempFile;

use vitalwatch_core::{
    AlertSink, EvaluationMode, RecordingAlertSink, ThresholdRegistry, VitalVerdict,
    VitalsEvaluator,
};
use vitalwatch_events::{BlinkConfig, ConsoleAlertSink};
use vitalwatch_monitor::readings::parse_readings;
use vitalwatch_monitor::report::render_report;
use vitalwatch_monitor::thresholds::{load_registry, ThresholdFileError};
use vitalwatch_monitor::{exit_code, EXIT_ALERT, EXIT_OK};

fn threshold_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be created");
    file.write_all(contents.as_bytes())
        .expect("temp file should be writable");
    file
}

// ---------------------------------------------------------------------------
// Threshold files
// ---------------------------------------------------------------------------

#[test]
fn no_path_selects_standard_thresholds() {
    let registry = load_registry(None).unwrap();
    assert_eq!(registry, ThresholdRegistry::standard());
}

#[test]
fn loads_custom_threshold_file() {
    let file = threshold_file(
        r#"[
            {"name": "temperature", "min": 96, "max": 101, "unit": "°F"},
            {"name": "pulseRate", "min": 50, "max": 110, "unit": "bpm"},
            {"name": "respirationRate", "min": 12, "max": 20, "unit": "breaths/min"}
        ]"#,
    );

    let registry = load_registry(Some(file.path())).unwrap();
    assert_eq!(registry.len(), 3);
    assert!(registry.contains("respirationRate"));
    assert!(!registry.contains("spo2"));
    assert_eq!(registry.lookup("pulseRate").unwrap().max(), Some(110.0));
}

#[test]
fn inverted_range_in_file_fails_at_load_time() {
    let file = threshold_file(r#"[{"name": "spo2", "min": 95, "max": 90, "unit": "%"}]"#);
    let err = load_registry(Some(file.path())).unwrap_err();
    assert_matches!(err, ThresholdFileError::Parse { .. });
    assert!(err.to_string().contains("spo2"));
}

#[test]
fn duplicate_vital_in_file_is_rejected() {
    let file = threshold_file(
        r#"[
            {"name": "spo2", "min": 90, "unit": "%"},
            {"name": "spo2", "min": 92, "unit": "%"}
        ]"#,
    );
    assert_matches!(
        load_registry(Some(file.path())),
        Err(ThresholdFileError::Parse { .. })
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert_matches!(
        load_registry(Some(path.as_path())),
        Err(ThresholdFileError::Read { .. })
    );
}

// ---------------------------------------------------------------------------
// Command-line flow
// ---------------------------------------------------------------------------

#[test]
fn arguments_in_range_exit_ok() {
    let readings = parse_readings(["temperature=98.6", "pulseRate=75", "spo2=97"]).unwrap();
    let evaluator = VitalsEvaluator::new(RecordingAlertSink::new());
    let result = evaluator.evaluate(&ThresholdRegistry::standard(), &readings);

    assert_eq!(exit_code(&result), EXIT_OK);
    assert_eq!(evaluator.sink().call_count(), 0);
    assert!(render_report(&result).contains("within normal limits"));
}

#[test]
fn arguments_with_unknown_vital_exit_with_alert() {
    let readings = parse_readings(["temperature=98.6", "respirationRate=15", "spo2=97"]).unwrap();
    let evaluator = VitalsEvaluator::new(RecordingAlertSink::new());
    let result = evaluator.evaluate(&ThresholdRegistry::standard(), &readings);

    assert_eq!(exit_code(&result), EXIT_ALERT);
    assert_eq!(evaluator.sink().call_count(), 1);
    assert!(render_report(&result).contains("unknown vital 'respirationRate'"));
}

#[test]
fn first_failure_mode_reports_single_issue() {
    let readings = parse_readings(["temperature=103", "pulseRate=110", "spo2=85"]).unwrap();
    let evaluator = VitalsEvaluator::new(RecordingAlertSink::new())
        .with_mode(EvaluationMode::StopAtFirstFailure);
    let result = evaluator.evaluate(&ThresholdRegistry::standard(), &readings);

    assert_eq!(result.verdicts.len(), 1);
    assert_eq!(evaluator.sink().last().unwrap()[0].name, "temperature");
}

#[test]
fn alert_follows_status_lines_without_repeating_values() {
    let readings = parse_readings(["temperature=94", "pulseRate=80", "spo2=96"]).unwrap();
    let evaluator = VitalsEvaluator::new(RecordingAlertSink::new());
    let result = evaluator.evaluate(&ThresholdRegistry::standard(), &readings);

    let report = render_report(&result).into_bytes();
    let console = ConsoleAlertSink::new(report, BlinkConfig::disabled());
    let failing: Vec<VitalVerdict> = result.failures().cloned().collect();
    console.notify(&failing);

    let writer = console.writer();
    let output = String::from_utf8(writer.lock().unwrap().clone()).unwrap();
    assert_eq!(
        output,
        "temperature: 94 (94°F) is too low (expected >= 95°F).\n\
         pulseRate: 80 (80 bpm) is OK.\n\
         spo2: 96 (96%) is OK.\n\
         \n\
         Summary of critical issues:\n\
         - temperature: (94°F) is too low (expected >= 95°F).\n\
         \n\
         !!! CRITICAL ALERT !!!\n"
    );
}
