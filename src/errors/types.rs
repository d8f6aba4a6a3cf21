use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoastError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unrecognized severity: {0}")]
    UnknownSeverity(String),

    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Geolocation failed: {0}")]
    Geolocation(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Report query failed: {0}")]
    Query(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoastError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CoastError::Validation { field, reason: reason.into() }
    }
}
