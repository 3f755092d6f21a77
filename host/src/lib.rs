//! AWS Lambda host for the outdated EC2 instance type Config rule.
//!
//! - `handler`: per-invocation orchestration
//! - `reporter` / `config_proxy`: submission to AWS Config
//! - `config`: process-level runtime settings

pub mod config;
pub mod config_proxy;
pub mod handler;
pub mod reporter;

#[cfg(feature = "mock")]
pub mod mock;

pub use config::{LogFormat, RuntimeConfig};
pub use config_proxy::ConfigEvaluationReporter;
pub use handler::RuleHandler;
pub use outdated_instance_common::{RuleError, RuleResult};
pub use reporter::EvaluationReporter;

/// Result type for host operations.
pub type Result<T> = RuleResult<T>;
