use crate::reporter::EvaluationReporter;
use crate::{Result, RuleError};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_config::primitives::{DateTime, DateTimeFormat};
use aws_sdk_config::types::{ComplianceType, Evaluation};
use aws_sdk_config::Client as ConfigClient;
use outdated_instance_common::{ComplianceVerdict, EvaluationResult};
use tracing::{info, warn};

/// Extract a meaningful error string from an AWS SDK error, preserving the
/// service error code (e.g. `InvalidResultTokenException`).
fn format_sdk_error<E: std::fmt::Debug, R: std::fmt::Debug>(
    err: &aws_sdk_config::error::SdkError<E, R>,
) -> String {
    match err {
        aws_sdk_config::error::SdkError::ServiceError(ctx) => {
            // Debug format includes the error variant name
            format!("{:?}", ctx.err())
        }
        other => format!("{}", other),
    }
}

/// Extract the AWS request ID from a successful SDK response.
fn extract_request_id(resp: &impl aws_types::request_id::RequestId) -> Option<String> {
    resp.request_id().map(|s| s.to_string())
}

pub fn to_compliance_type(verdict: ComplianceVerdict) -> ComplianceType {
    match verdict {
        ComplianceVerdict::Compliant => ComplianceType::Compliant,
        ComplianceVerdict::NonCompliant => ComplianceType::NonCompliant,
        ComplianceVerdict::NotApplicable => ComplianceType::NotApplicable,
    }
}

/// Parse `configurationItemCaptureTime` (ISO-8601) into the SDK timestamp.
pub fn parse_ordering_timestamp(raw: &str) -> Result<DateTime> {
    DateTime::from_str(raw, DateTimeFormat::DateTime).map_err(|e| {
        RuleError::malformed_event(format!(
            "configurationItemCaptureTime '{}' is not an ISO-8601 timestamp: {}",
            raw, e
        ))
    })
}

/// Build the SDK evaluation for a rule result.
pub fn to_sdk_evaluation(result: &EvaluationResult) -> Result<Evaluation> {
    Evaluation::builder()
        .compliance_resource_type(&result.compliance_resource_type)
        .compliance_resource_id(&result.compliance_resource_id)
        .compliance_type(to_compliance_type(result.compliance_type))
        .ordering_timestamp(parse_ordering_timestamp(&result.ordering_timestamp)?)
        .set_annotation(result.annotation.clone())
        .build()
        .map_err(|e| RuleError::submission(format!("Invalid evaluation: {}", e)))
}

/// Reports evaluations to AWS Config through `PutEvaluations`.
///
/// Cheap to clone; the underlying client is shared.
#[derive(Clone)]
pub struct ConfigEvaluationReporter {
    client: ConfigClient,
    test_mode: bool,
}

impl ConfigEvaluationReporter {
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(ConfigClient::new(config))
    }

    pub fn from_client(client: ConfigClient) -> Self {
        Self {
            client,
            test_mode: false,
        }
    }

    /// In test mode AWS Config validates the evaluation but does not record it.
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }
}

#[async_trait]
impl EvaluationReporter for ConfigEvaluationReporter {
    async fn put_evaluation(&self, result: &EvaluationResult) -> Result<()> {
        let evaluation = to_sdk_evaluation(result)?;

        let resp = self
            .client
            .put_evaluations()
            .evaluations(evaluation)
            .result_token(&result.result_token)
            .test_mode(self.test_mode)
            .send()
            .await
            .map_err(|e| {
                RuleError::submission(format!("PutEvaluations failed: {}", format_sdk_error(&e)))
            })?;

        let aws_req_id = extract_request_id(&resp);

        let failed = resp.failed_evaluations();
        if !failed.is_empty() {
            warn!(
                message = "evaluation rejected",
                event = "put_evaluations_failed",
                failed = failed.len(),
                aws_request_id = aws_req_id.as_deref().unwrap_or("-")
            );
            return Err(RuleError::submission(format!(
                "AWS Config rejected {} evaluation(s) for resource {}",
                failed.len(),
                result.compliance_resource_id
            )));
        }

        info!(
            message = "evaluation submitted",
            event = "put_evaluations",
            resource_id = %result.compliance_resource_id,
            compliance_type = %result.compliance_type,
            test_mode = self.test_mode,
            aws_request_id = aws_req_id.as_deref().unwrap_or("-")
        );
        Ok(())
    }
}
