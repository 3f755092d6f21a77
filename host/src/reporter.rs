//! Submission seam between the rule handler and AWS Config.

use async_trait::async_trait;
use outdated_instance_common::EvaluationResult;

use crate::Result;

/// Submits one evaluation to the auditing service.
///
/// Implementations must not buffer, batch or retry: a failed submission is
/// returned to the caller, which hands it to the Lambda runtime.
#[async_trait]
pub trait EvaluationReporter: Send + Sync {
    async fn put_evaluation(&self, result: &EvaluationResult) -> Result<()>;
}

#[async_trait]
impl<R: EvaluationReporter + ?Sized> EvaluationReporter for std::sync::Arc<R> {
    async fn put_evaluation(&self, result: &EvaluationResult) -> Result<()> {
        (**self).put_evaluation(result).await
    }
}
