use super::types::CoastError;
use crate::notify::NotificationLevel;

/// Which part of the error taxonomy an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed user or seed input, rejected at the store boundary.
    InputValidation,
    /// An optional capability (heat renderer, geolocation) is missing.
    CapabilityUnavailable,
    /// An async collaborator failed, was denied, or timed out.
    ExternalFailure,
    Internal,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub category: ErrorCategory,
    /// Whether the pipeline keeps running after reporting this error.
    pub recoverable: bool,
}

impl CoastError {
    /// Classify this error to decide how it is surfaced to the user.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            CoastError::Validation { .. } => ErrorClassification {
                error_type: "ValidationError",
                category: ErrorCategory::InputValidation,
                recoverable: true,
            },
            CoastError::InvalidCoordinates(_) => ErrorClassification {
                error_type: "InvalidCoordinatesError",
                category: ErrorCategory::InputValidation,
                recoverable: true,
            },
            CoastError::UnknownSeverity(_) => ErrorClassification {
                error_type: "UnknownSeverityError",
                category: ErrorCategory::InputValidation,
                recoverable: true,
            },
            CoastError::CapabilityUnavailable(_) => ErrorClassification {
                error_type: "CapabilityUnavailableError",
                category: ErrorCategory::CapabilityUnavailable,
                recoverable: true,
            },
            CoastError::Geolocation(_) => ErrorClassification {
                error_type: "GeolocationError",
                category: ErrorCategory::ExternalFailure,
                recoverable: true,
            },
            CoastError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                category: ErrorCategory::ExternalFailure,
                recoverable: true,
            },
            CoastError::Query(_) => ErrorClassification {
                error_type: "QueryError",
                category: ErrorCategory::ExternalFailure,
                recoverable: true,
            },
            CoastError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                category: ErrorCategory::InputValidation,
                recoverable: true,
            },

            // Startup-time failures
            CoastError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                category: ErrorCategory::Internal,
                recoverable: false,
            },
            CoastError::Io(_) => ErrorClassification {
                error_type: "IoError",
                category: ErrorCategory::Internal,
                recoverable: false,
            },
            CoastError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                category: ErrorCategory::InputValidation,
                recoverable: true,
            },
            CoastError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                category: ErrorCategory::InputValidation,
                recoverable: false,
            },
            CoastError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                category: ErrorCategory::Internal,
                recoverable: false,
            },
        }
    }

    /// Notification level used when this error is shown to the user.
    pub fn notification_level(&self) -> NotificationLevel {
        match self.classify().category {
            ErrorCategory::CapabilityUnavailable => NotificationLevel::Info,
            _ => NotificationLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_input_error() {
        let err = CoastError::validation("description", "must not be empty");
        let class = err.classify();
        assert_eq!(class.category, ErrorCategory::InputValidation);
        assert_eq!(class.error_type, "ValidationError");
        assert!(class.recoverable);
    }

    #[test]
    fn test_unknown_severity_is_input_error() {
        let err = CoastError::UnknownSeverity("extreme".into());
        assert_eq!(err.classify().category, ErrorCategory::InputValidation);
        assert_eq!(err.notification_level(), NotificationLevel::Error);
    }

    #[test]
    fn test_missing_capability_degrades_to_info() {
        let err = CoastError::CapabilityUnavailable("heat layer".into());
        let class = err.classify();
        assert_eq!(class.category, ErrorCategory::CapabilityUnavailable);
        assert!(class.recoverable);
        assert_eq!(err.notification_level(), NotificationLevel::Info);
    }

    #[test]
    fn test_geolocation_timeout_is_external() {
        let err = CoastError::Timeout("geolocation".into());
        assert_eq!(err.classify().category, ErrorCategory::ExternalFailure);
    }

    #[test]
    fn test_config_error_not_recoverable() {
        let err = CoastError::Config("bad zoom".into());
        assert!(!err.classify().recoverable);
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = CoastError::validation("latitude", "must be between -90 and 90");
        assert_eq!(err.to_string(), "Invalid latitude: must be between -90 and 90");
    }
}
