//! Rule error types with reason codes.

use thiserror::Error;

/// Reason codes for rule errors, providing machine-readable context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    /// An embedded document is not valid JSON or does not match its schema.
    MalformedEvent = 100,
    /// A required field is absent.
    MissingField = 200,
    /// AWS Config rejected or failed the evaluation submission.
    SubmissionFailed = 300,
    /// Runtime configuration could not be resolved.
    ConfigurationInvalid = 400,
}

/// Errors that end a single rule invocation.
///
/// None of these are recovered locally. They surface to the Lambda runtime,
/// which records the invocation as failed and applies its own retry policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Malformed event (reason {reason}): {message}")]
    MalformedEvent { reason: u32, message: String },

    #[error("Missing field (reason {reason}): {field}")]
    MissingField { reason: u32, field: String },

    #[error("Submission failed (reason {reason}): {message}")]
    Submission { reason: u32, message: String },

    #[error("Configuration error (reason {reason}): {message}")]
    Configuration { reason: u32, message: String },
}

impl RuleError {
    pub fn malformed_event(message: impl Into<String>) -> Self {
        Self::MalformedEvent {
            reason: ReasonCode::MalformedEvent as u32,
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            reason: ReasonCode::MissingField as u32,
            field: field.into(),
        }
    }

    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            reason: ReasonCode::SubmissionFailed as u32,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            reason: ReasonCode::ConfigurationInvalid as u32,
            message: message.into(),
        }
    }

    /// The reason code carried by this error.
    pub fn reason(&self) -> u32 {
        match self {
            Self::MalformedEvent { reason, .. }
            | Self::MissingField { reason, .. }
            | Self::Submission { reason, .. }
            | Self::Configuration { reason, .. } => *reason,
        }
    }
}

impl From<serde_json::Error> for RuleError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed_event(err.to_string())
    }
}

/// Result type for rule operations.
pub type RuleResult<T> = std::result::Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        assert_eq!(RuleError::malformed_event("x").reason(), 100);
        assert_eq!(RuleError::missing_field("x").reason(), 200);
        assert_eq!(RuleError::submission("x").reason(), 300);
        assert_eq!(RuleError::configuration("x").reason(), 400);
    }

    #[test]
    fn test_serde_error_maps_to_malformed_event() {
        let err: RuleError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, RuleError::MalformedEvent { .. }));
    }

    #[test]
    fn test_display_includes_field() {
        let err = RuleError::missing_field("configuration.instanceType");
        assert_eq!(
            err.to_string(),
            "Missing field (reason 200): configuration.instanceType"
        );
    }
}
