//! Threshold file loading.
//!
//! A threshold file is a JSON array of ranges:
//!
//! ```json
//! [
//!   { "name": "temperature", "min": 95, "max": 102, "unit": "°F" },
//!   { "name": "spo2", "min": 90, "unit": "%" }
//! ]
//! ```
//!
//! Every range is validated while the file is parsed, so a malformed
//! configuration is rejected at start-up.

use std::path::{Path, PathBuf};

use vitalwatch_core::ThresholdRegistry;

#[derive(Debug, thiserror::Error)]
pub enum ThresholdFileError {
    #[error("Failed to read threshold file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid threshold file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the registry from `path`, or return the standard ranges if `None`.
pub fn load_registry(path: Option<&Path>) -> Result<ThresholdRegistry, ThresholdFileError> {
    let Some(path) = path else {
        tracing::info!("Using standard adult thresholds");
        return Ok(ThresholdRegistry::standard());
    };

    let contents = std::fs::read_to_string(path).map_err(|source| ThresholdFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let registry: ThresholdRegistry =
        serde_json::from_str(&contents).map_err(|source| ThresholdFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        vitals = registry.len(),
        "Loaded threshold file",
    );
    Ok(registry)
}
