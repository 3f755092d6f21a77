//! Handler tests against the in-memory reporter.
//!
//! Every test drives `RuleHandler::handle` with a change event shaped like the
//! ones AWS Config delivers and inspects what reached the reporter.

use std::sync::Arc;

use lambda_runtime::{Context, LambdaEvent};
use outdated_instance_common::{ChangeEvent, ComplianceVerdict, RuleError};
use outdated_instance_host::mock::RecordingReporter;
use outdated_instance_host::RuleHandler;
use serde_json::json;

fn make_event(
    resource_type: &str,
    status: &str,
    instance_type: &str,
    left_scope: bool,
    rule_parameters: serde_json::Value,
) -> ChangeEvent {
    let invoking_event = json!({
        "configurationItem": {
            "resourceType": resource_type,
            "resourceId": "i-0123456789abcdef0",
            "configurationItemStatus": status,
            "configurationItemCaptureTime": "2016-11-02T18:20:39.016Z",
            "configuration": { "instanceType": instance_type }
        },
        "messageType": "ConfigurationItemChangeNotification"
    });
    serde_json::from_value(json!({
        "invokingEvent": invoking_event.to_string(),
        "ruleParameters": rule_parameters.to_string(),
        "resultToken": "result-token-0001",
        "eventLeftScope": left_scope,
        "configRuleName": "ec2-outdated-instance-types"
    }))
    .unwrap()
}

fn outdated_params() -> serde_json::Value {
    json!({ "outdatedInstanceList": "m1.small,m1.medium" })
}

#[tokio::test]
async fn test_non_compliant_instance_is_submitted() {
    let reporter = RecordingReporter::new();
    let handler = RuleHandler::new(reporter.clone());

    let event = make_event("AWS::EC2::Instance", "OK", "m1.small", false, outdated_params());
    let result = handler.handle(&event).await.unwrap();

    assert_eq!(result.compliance_type, ComplianceVerdict::NonCompliant);
    let submitted = reporter.submitted().await;
    assert_eq!(submitted, vec![result]);
    assert_eq!(submitted[0].compliance_resource_type, "AWS::EC2::Instance");
    assert_eq!(submitted[0].compliance_resource_id, "i-0123456789abcdef0");
    assert_eq!(submitted[0].ordering_timestamp, "2016-11-02T18:20:39.016Z");
    assert_eq!(submitted[0].result_token, "result-token-0001");
}

#[tokio::test]
async fn test_exactly_one_submission_per_verdict() {
    let cases = [
        ("AWS::EC2::Instance", "OK", "m5.large", false, ComplianceVerdict::Compliant),
        ("AWS::EC2::Volume", "OK", "m1.small", false, ComplianceVerdict::NotApplicable),
        ("AWS::EC2::Instance", "Deleted", "m1.small", false, ComplianceVerdict::NotApplicable),
        ("AWS::EC2::Instance", "OK", "m1.small", true, ComplianceVerdict::NotApplicable),
    ];

    for (resource_type, status, instance_type, left_scope, expected) in cases {
        let reporter = RecordingReporter::new();
        let handler = RuleHandler::new(reporter.clone());
        let event = make_event(
            resource_type,
            status,
            instance_type,
            left_scope,
            outdated_params(),
        );

        handler.handle(&event).await.unwrap();

        let submitted = reporter.submitted().await;
        assert_eq!(submitted.len(), 1, "{} {}", resource_type, status);
        assert_eq!(submitted[0].compliance_type, expected);
    }
}

#[tokio::test]
async fn test_repeated_invocations_submit_identical_results() {
    let reporter = RecordingReporter::new();
    let handler = RuleHandler::new(reporter.clone());
    let event = make_event("AWS::EC2::Instance", "OK", "m1.medium", false, outdated_params());

    handler.handle(&event).await.unwrap();
    handler.handle(&event).await.unwrap();

    let submitted = reporter.submitted().await;
    assert_eq!(submitted.len(), 2);
    assert_eq!(submitted[0], submitted[1]);
}

#[tokio::test]
async fn test_missing_parameter_submits_nothing() {
    let reporter = RecordingReporter::new();
    let handler = RuleHandler::new(reporter.clone());
    let event = make_event("AWS::EC2::Instance", "OK", "m1.small", false, json!({}));

    let err = handler.handle(&event).await.unwrap_err();
    assert!(matches!(err, RuleError::MissingField { .. }));
    assert!(reporter.submitted().await.is_empty());
}

#[tokio::test]
async fn test_submission_failure_propagates() {
    let handler = RuleHandler::new(RecordingReporter::failing("AccessDeniedException"));
    let event = make_event("AWS::EC2::Instance", "OK", "m1.small", false, outdated_params());

    let err = handler.handle(&event).await.unwrap_err();
    assert!(matches!(err, RuleError::Submission { .. }));
    assert!(err.to_string().contains("AccessDeniedException"));
}

#[tokio::test]
async fn test_shared_reporter_handle() {
    let reporter = Arc::new(RecordingReporter::new());
    let handler = RuleHandler::new(Arc::clone(&reporter));
    let event = make_event("AWS::EC2::Instance", "OK", "m5.large", false, outdated_params());

    handler.handle(&event).await.unwrap();
    assert_eq!(reporter.submitted().await.len(), 1);
    assert!(Arc::ptr_eq(handler.reporter(), &reporter));
}

#[tokio::test]
async fn test_lambda_adapter() {
    let reporter = RecordingReporter::new();
    let handler = RuleHandler::new(reporter.clone());
    let event = make_event("AWS::EC2::Instance", "OK", "m1.small", false, outdated_params());

    handler
        .handle_lambda(LambdaEvent::new(event, Context::default()))
        .await
        .unwrap();
    assert_eq!(reporter.submitted().await.len(), 1);

    let bad = make_event("AWS::EC2::Instance", "OK", "m1.small", false, json!({}));
    assert!(handler
        .handle_lambda(LambdaEvent::new(bad, Context::default()))
        .await
        .is_err());
}
