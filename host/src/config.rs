use std::str::FromStr;

use crate::{Result, RuleError};

/// Enables `PutEvaluations` test mode (`true`/`1`).
pub const ENV_TEST_MODE: &str = "OUTDATED_RULE_TEST_MODE";
/// Log output format (`text` or `json`).
pub const ENV_LOG_FORMAT: &str = "OUTDATED_RULE_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(RuleError::configuration(format!(
                "{} must be 'text' or 'json', got '{}'",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

/// Process-level settings for the Lambda host.
///
/// Resolution: environment variable, then default. The rule parameters are not
/// part of this; they arrive with every event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeConfig {
    pub test_mode: bool,
    pub log_format: LogFormat,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| get(name).filter(|v| !v.is_empty());

        let test_mode = match var(ENV_TEST_MODE) {
            Some(v) => parse_bool(ENV_TEST_MODE, &v)?,
            None => false,
        };
        let log_format = match var(ENV_LOG_FORMAT) {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            test_mode,
            log_format,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(RuleError::configuration(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}
