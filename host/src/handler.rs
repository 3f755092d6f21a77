//! Invocation handler: one change event in, one evaluation submitted.

use lambda_runtime::LambdaEvent;
use outdated_instance_common::{ChangeEvent, EvaluationResult};
use outdated_instance_compliance::policy::RuleEngine;
use tracing::{info, Instrument};

use crate::reporter::EvaluationReporter;
use crate::Result;

/// Runs the rule for each invocation and submits the verdict.
///
/// Built once per process; the reporter (and the SDK client inside it) is
/// reused across invocations.
pub struct RuleHandler<R> {
    engine: RuleEngine,
    reporter: R,
}

impl<R: EvaluationReporter> RuleHandler<R> {
    pub fn new(reporter: R) -> Self {
        Self {
            engine: RuleEngine,
            reporter,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Evaluate the event and submit exactly one result.
    ///
    /// Errors from decoding, evaluation or submission are returned unchanged;
    /// nothing is submitted when decoding or evaluation fails.
    pub async fn handle(&self, event: &ChangeEvent) -> Result<EvaluationResult> {
        let evaluation = self.engine.evaluate(event)?;

        info!(
            message = "resource evaluated",
            event = "evaluate",
            resource_type = %evaluation.result.compliance_resource_type,
            resource_id = %evaluation.result.compliance_resource_id,
            applicable = evaluation.applicable,
            compliance_type = %evaluation.verdict(),
            reason = %evaluation.reason
        );

        self.reporter.put_evaluation(&evaluation.result).await?;
        Ok(evaluation.result)
    }

    /// Lambda runtime adapter around [`RuleHandler::handle`].
    pub async fn handle_lambda(
        &self,
        event: LambdaEvent<ChangeEvent>,
    ) -> std::result::Result<(), lambda_runtime::Error> {
        let (payload, context) = event.into_parts();
        let span = tracing::info_span!(
            "invocation",
            request_id = %context.request_id,
            rule = payload.config_rule_name.as_deref().unwrap_or("-")
        );
        self.handle(&payload).instrument(span).await?;
        Ok(())
    }
}
