//! Monitor configuration read from environment variables.
//!
//! Blank values are treated as unset. Malformed values are reported as
//! [`ConfigError`] rather than silently replaced by defaults.

use std::path::PathBuf;
use std::time::Duration;

use vitalwatch_core::EvaluationMode;

/// Default console blink duration in seconds.
const DEFAULT_ALERT_BLINK_SECS: u64 = 12;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("EVALUATION_MODE must be 'aggregate' or 'first-failure', got '{0}'")]
    InvalidMode(String),
}

/// Monitor configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// JSON threshold file; `None` selects the standard adult ranges.
    pub thresholds_path: Option<PathBuf>,
    /// How long the console alert animation runs.
    pub alert_blink: Duration,
    /// On-call webhook; `None` disables paging.
    pub webhook_url: Option<String>,
    pub mode: EvaluationMode,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds_path: None,
            alert_blink: Duration::from_secs(DEFAULT_ALERT_BLINK_SECS),
            webhook_url: None,
            mode: EvaluationMode::Aggregate,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var             | Default     |
    /// |---------------------|-------------|
    /// | `THRESHOLDS_PATH`   | unset       |
    /// | `ALERT_BLINK_SECS`  | `12`        |
    /// | `ALERT_WEBHOOK_URL` | unset       |
    /// | `EVALUATION_MODE`   | `aggregate` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let thresholds_path = non_empty("THRESHOLDS_PATH").map(PathBuf::from);

        let alert_blink = match non_empty("ALERT_BLINK_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidNumber {
                    var: "ALERT_BLINK_SECS",
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_ALERT_BLINK_SECS),
        };

        let webhook_url = non_empty("ALERT_WEBHOOK_URL");

        let mode = match non_empty("EVALUATION_MODE").as_deref() {
            None | Some("aggregate") => EvaluationMode::Aggregate,
            Some("first-failure") => EvaluationMode::StopAtFirstFailure,
            Some(other) => return Err(ConfigError::InvalidMode(other.to_string())),
        };

        Ok(Self {
            thresholds_path,
            alert_blink,
            webhook_url,
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = MonitorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, MonitorConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = MonitorConfig::from_lookup(lookup(&[
            ("THRESHOLDS_PATH", "/etc/vitalwatch/thresholds.json"),
            ("ALERT_BLINK_SECS", "4"),
            ("ALERT_WEBHOOK_URL", "https://pager.example/hook"),
            ("EVALUATION_MODE", "first-failure"),
        ]))
        .unwrap();

        assert_eq!(
            config.thresholds_path,
            Some(PathBuf::from("/etc/vitalwatch/thresholds.json"))
        );
        assert_eq!(config.alert_blink, Duration::from_secs(4));
        assert_eq!(config.webhook_url.as_deref(), Some("https://pager.example/hook"));
        assert_eq!(config.mode, EvaluationMode::StopAtFirstFailure);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let vars = [("ALERT_WEBHOOK_URL", "  "), ("THRESHOLDS_PATH", "")];
        let config = MonitorConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(config.webhook_url.is_none());
        assert!(config.thresholds_path.is_none());
    }

    #[test]
    fn rejects_bad_blink_duration() {
        assert_matches!(
            MonitorConfig::from_lookup(lookup(&[("ALERT_BLINK_SECS", "soon")])),
            Err(ConfigError::InvalidNumber { var: "ALERT_BLINK_SECS", .. })
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        assert_matches!(
            MonitorConfig::from_lookup(lookup(&[("EVALUATION_MODE", "fast")])),
            Err(ConfigError::InvalidMode(ref m)) if m == "fast"
        );
    }
}
