//! Evaluation pipeline and result types.

pub mod rules;

use outdated_instance_common::{
    ChangeEvent, ComplianceVerdict, ConfigurationItem, EvaluationResult, RuleResult,
};
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one change event, ready for submission.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The record to submit to AWS Config.
    pub result: EvaluationResult,
    /// Whether the applicability filter let the event through.
    pub applicable: bool,
    /// Explanation of the verdict.
    pub reason: String,
}

impl Evaluation {
    pub fn verdict(&self) -> ComplianceVerdict {
        self.result.compliance_type
    }
}

/// Rule engine that turns a change event into exactly one evaluation.
///
/// Stateless: the same event always yields the same evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Decode the event's embedded documents and evaluate them.
    ///
    /// The verdict defaults to NOT_APPLICABLE and is replaced by the
    /// classifier's only when the applicability filter passes. Decoding
    /// failures and missing required fields are returned as errors.
    pub fn evaluate(&self, event: &ChangeEvent) -> RuleResult<Evaluation> {
        let invoking_event = event.decode_invoking_event()?;
        let params = event.decode_rule_parameters()?;
        let item = &invoking_event.configuration_item;

        let applicable = rules::is_applicable(item, event);
        let (verdict, reason) = if applicable {
            let decision = rules::classify(item, &params)?;
            (decision.verdict, decision.reason)
        } else {
            (
                ComplianceVerdict::NotApplicable,
                rules::not_applicable_reason(item, event),
            )
        };

        Ok(Evaluation {
            result: build_result(item, verdict, &event.result_token, &reason),
            applicable,
            reason,
        })
    }
}

fn build_result(
    item: &ConfigurationItem,
    verdict: ComplianceVerdict,
    result_token: &str,
    reason: &str,
) -> EvaluationResult {
    let result = EvaluationResult::new(item, verdict, result_token);
    // Only violations are annotated; AWS Config surfaces these in its console.
    if verdict == ComplianceVerdict::NonCompliant {
        result.with_annotation(reason)
    } else {
        result
    }
}
