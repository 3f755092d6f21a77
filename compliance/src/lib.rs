//! Compliance evaluation for the outdated EC2 instance type rule.
//!
//! This crate provides:
//! - The applicability filter and compliance classifier (`policy::rules`)
//! - The pure evaluation pipeline from change event to evaluation record (`policy`)

pub mod policy;

pub use outdated_instance_common::{RuleError, RuleResult};
pub use policy::{Evaluation, RuleEngine};
