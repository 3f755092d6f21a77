//! Shared types for the outdated EC2 instance type Config rule.
//!
//! - `types`: the AWS Config change event, its decoded documents, and the
//!   evaluation record sent back to the service
//! - `error`: the rule's error type with reason codes

pub mod error;
pub mod types;

pub use error::{ReasonCode, RuleError, RuleResult};
pub use types::{
    ChangeEvent, ComplianceVerdict, ConfigurationItem, ConfigurationItemStatus,
    EvaluationResult, InvokingEvent, ResourceConfiguration, RuleParameters,
    INSTANCE_RESOURCE_TYPE, MAX_ANNOTATION_LEN,
};

/// Crate version, logged by the Lambda host at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
