//! Individual rule evaluators.
//!
//! Each function takes the minimum arguments needed so it can be unit-tested
//! in isolation. Neither has side effects.

use outdated_instance_common::{
    ChangeEvent, ComplianceVerdict, ConfigurationItem, ConfigurationItemStatus, RuleParameters,
    RuleResult, INSTANCE_RESOURCE_TYPE,
};

/// Verdict together with the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: ComplianceVerdict,
    pub reason: String,
}

impl Decision {
    fn new(verdict: ComplianceVerdict, reason: String) -> Self {
        Self { verdict, reason }
    }
}

// ---------------------------------------------------------------------------
// Applicability
// ---------------------------------------------------------------------------

/// Statuses for which the resource is evaluated.
pub fn is_accepted_status(status: &ConfigurationItemStatus) -> bool {
    matches!(
        status,
        ConfigurationItemStatus::Ok | ConfigurationItemStatus::ResourceDiscovered
    )
}

/// The change event is eligible for evaluation: the item is in an accepted
/// status and the resource has not left the rule's scope.
pub fn is_applicable(item: &ConfigurationItem, event: &ChangeEvent) -> bool {
    is_accepted_status(&item.configuration_item_status) && !event.event_left_scope
}

/// Reason a non-applicable event was skipped.
pub fn not_applicable_reason(item: &ConfigurationItem, event: &ChangeEvent) -> String {
    if event.event_left_scope {
        "Resource left the rule scope".to_string()
    } else {
        format!(
            "Configuration item status '{}' is not evaluated",
            item.configuration_item_status
        )
    }
}

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

/// Classify an item against the outdated instance type list.
///
/// First match wins: a non-instance resource is NOT_APPLICABLE, an instance
/// type absent from the list is COMPLIANT, anything else is NON_COMPLIANT.
/// An instance without a recorded instance type is an error, never a verdict.
pub fn classify(item: &ConfigurationItem, params: &RuleParameters) -> RuleResult<Decision> {
    if item.resource_type != INSTANCE_RESOURCE_TYPE {
        return Ok(Decision::new(
            ComplianceVerdict::NotApplicable,
            format!(
                "Resource type '{}' is not {}",
                item.resource_type, INSTANCE_RESOURCE_TYPE
            ),
        ));
    }

    let instance_type = item.instance_type()?;
    if !params.is_outdated(instance_type) {
        Ok(Decision::new(
            ComplianceVerdict::Compliant,
            format!("Instance type '{}' is not in the outdated list", instance_type),
        ))
    } else {
        Ok(Decision::new(
            ComplianceVerdict::NonCompliant,
            format!("Instance type '{}' is an outdated generation", instance_type),
        ))
    }
}

/// Compliance verdict for an item that passed the applicability filter.
pub fn evaluate_compliance(
    item: &ConfigurationItem,
    params: &RuleParameters,
) -> RuleResult<ComplianceVerdict> {
    classify(item, params).map(|d| d.verdict)
}
