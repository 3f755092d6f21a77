use crate::reporter::EvaluationReporter;
use crate::{Result, RuleError};
use async_trait::async_trait;
use outdated_instance_common::EvaluationResult;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock reporter that records submissions in memory instead of calling AWS Config.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    submitted: Arc<Mutex<Vec<EvaluationResult>>>,
    fail_with: Option<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter whose every submission fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            submitted: Arc::default(),
            fail_with: Some(message.into()),
        }
    }

    /// Evaluations accepted so far, in submission order.
    pub async fn submitted(&self) -> Vec<EvaluationResult> {
        self.submitted.lock().await.clone()
    }
}

#[async_trait]
impl EvaluationReporter for RecordingReporter {
    async fn put_evaluation(&self, result: &EvaluationResult) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(RuleError::submission(message.clone()));
        }
        self.submitted.lock().await.push(result.clone());
        Ok(())
    }
}
