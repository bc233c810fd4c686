#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid range for '{name}': min {min} is greater than max {max}")]
    InvalidRange { name: String, min: f64, max: f64 },

    #[error("Invalid range for '{name}': bounds must be finite numbers")]
    NonFiniteBound { name: String },

    #[error("Vital name must not be empty")]
    EmptyName,

    #[error("Duplicate vital in threshold configuration: '{name}'")]
    DuplicateVital { name: String },

    #[error("unknown vital '{name}'")]
    UnknownVital { name: String },
}

impl CoreError {
    /// Whether the error describes a malformed threshold configuration
    /// (as opposed to a lookup miss).
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::UnknownVital { .. })
    }
}
