//! Command-line reading parser.

use vitalwatch_core::Reading;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadingParseError {
    #[error("Expected NAME=VALUE, got '{0}'")]
    MissingSeparator(String),

    #[error("Reading '{0}' has an empty name")]
    EmptyName(String),

    #[error("Reading '{name}' has a non-numeric value '{value}'")]
    InvalidValue { name: String, value: String },
}

/// Parse `NAME=VALUE` arguments into readings, keeping their order.
///
/// Names are kept verbatim so that unknown or mistyped vitals are reported
/// by the evaluator rather than silently corrected here.
pub fn parse_readings<I, S>(args: I) -> Result<Vec<Reading>, ReadingParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().map(|arg| parse_reading(arg.as_ref())).collect()
}

fn parse_reading(arg: &str) -> Result<Reading, ReadingParseError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| ReadingParseError::MissingSeparator(arg.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ReadingParseError::EmptyName(arg.to_string()));
    }
    let value: f64 = value
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ReadingParseError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })?;
    Ok(Reading::new(name, value))
}
