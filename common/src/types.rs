use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{RuleError, RuleResult};

/// Resource type identifier for EC2 instances as reported by AWS Config.
pub const INSTANCE_RESOURCE_TYPE: &str = "AWS::EC2::Instance";

/// Maximum annotation length accepted by `PutEvaluations`.
pub const MAX_ANNOTATION_LEN: usize = 256;

/// Outer payload AWS Config delivers to the rule function.
///
/// `invokingEvent` and `ruleParameters` arrive as JSON documents serialized
/// into strings; they are decoded on demand with [`ChangeEvent::decode_invoking_event`]
/// and [`ChangeEvent::decode_rule_parameters`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub invoking_event: String,
    pub rule_parameters: String,
    pub result_token: String,
    pub event_left_scope: bool,
    // Envelope metadata, only used for log context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_rule_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_rule_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ChangeEvent {
    /// Decode the embedded invoking event document.
    pub fn decode_invoking_event(&self) -> RuleResult<InvokingEvent> {
        serde_json::from_str(&self.invoking_event)
            .map_err(|e| RuleError::malformed_event(format!("invokingEvent: {}", e)))
    }

    /// Decode the embedded rule parameters document.
    ///
    /// `outdatedInstanceList` is required; a document without it is rejected
    /// rather than treated as an empty list.
    pub fn decode_rule_parameters(&self) -> RuleResult<RuleParameters> {
        let doc: RuleParametersDocument = serde_json::from_str(&self.rule_parameters)
            .map_err(|e| RuleError::malformed_event(format!("ruleParameters: {}", e)))?;
        let outdated_instance_list = doc
            .outdated_instance_list
            .ok_or_else(|| RuleError::missing_field("ruleParameters.outdatedInstanceList"))?;
        Ok(RuleParameters {
            outdated_instance_list,
        })
    }
}

/// Decoded `invokingEvent` document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvokingEvent {
    pub configuration_item: ConfigurationItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_creation_time: Option<String>,
}

/// Point-in-time description of the resource under evaluation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationItem {
    pub resource_type: String,
    pub resource_id: String,
    pub configuration_item_status: ConfigurationItemStatus,
    pub configuration_item_capture_time: String,
    /// `null` for deleted resources.
    #[serde(default)]
    pub configuration: Option<ResourceConfiguration>,
}

impl ConfigurationItem {
    /// The recorded instance type. Only guaranteed for EC2 instances.
    pub fn instance_type(&self) -> RuleResult<&str> {
        self.configuration
            .as_ref()
            .and_then(|c| c.instance_type.as_deref())
            .ok_or_else(|| RuleError::missing_field("configurationItem.configuration.instanceType"))
    }
}

/// Resource configuration as recorded by AWS Config.
///
/// Only `instanceType` is read; every other key is kept untyped.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// `configurationItemStatus` values. Unknown values are kept verbatim.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum ConfigurationItemStatus {
    Ok,
    ResourceDiscovered,
    ResourceNotRecorded,
    ResourceDeleted,
    ResourceDeletedNotRecorded,
    Other(String),
}

impl ConfigurationItemStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ResourceDiscovered => "ResourceDiscovered",
            Self::ResourceNotRecorded => "ResourceNotRecorded",
            Self::ResourceDeleted => "ResourceDeleted",
            Self::ResourceDeletedNotRecorded => "ResourceDeletedNotRecorded",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ConfigurationItemStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OK" => Self::Ok,
            "ResourceDiscovered" => Self::ResourceDiscovered,
            "ResourceNotRecorded" => Self::ResourceNotRecorded,
            "ResourceDeleted" => Self::ResourceDeleted,
            "ResourceDeletedNotRecorded" => Self::ResourceDeletedNotRecorded,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ConfigurationItemStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ConfigurationItemStatus> for String {
    fn from(status: ConfigurationItemStatus) -> Self {
        match status {
            ConfigurationItemStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConfigurationItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleParametersDocument {
    #[serde(default)]
    outdated_instance_list: Option<String>,
}

/// Rule parameters configured on the AWS Config rule.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleParameters {
    /// Comma-separated instance types, e.g. `m1.small,m1.medium`.
    pub outdated_instance_list: String,
}

impl RuleParameters {
    pub fn new(outdated_instance_list: impl Into<String>) -> Self {
        Self {
            outdated_instance_list: outdated_instance_list.into(),
        }
    }

    /// The configured list as a set. Entries are split on `,` and compared
    /// verbatim: surrounding whitespace and case are significant.
    pub fn outdated_instance_types(&self) -> BTreeSet<&str> {
        self.outdated_instance_list.split(',').collect()
    }

    pub fn is_outdated(&self, instance_type: &str) -> bool {
        self.outdated_instance_types().contains(instance_type)
    }
}

/// Compliance verdict reported for a single resource.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceVerdict {
    Compliant,
    NonCompliant,
    NotApplicable,
}

impl ComplianceVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::NonCompliant => "NON_COMPLIANT",
            Self::NotApplicable => "NOT_APPLICABLE",
        }
    }
}

impl fmt::Display for ComplianceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One evaluation as submitted to `PutEvaluations`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct EvaluationResult {
    pub compliance_resource_type: String,
    pub compliance_resource_id: String,
    pub compliance_type: ComplianceVerdict,
    /// Pass-through of `configurationItemCaptureTime`.
    pub ordering_timestamp: String,
    /// Pass-through of the event's `resultToken`.
    pub result_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl EvaluationResult {
    pub fn new(
        item: &ConfigurationItem,
        verdict: ComplianceVerdict,
        result_token: impl Into<String>,
    ) -> Self {
        Self {
            compliance_resource_type: item.resource_type.clone(),
            compliance_resource_id: item.resource_id.clone(),
            compliance_type: verdict,
            ordering_timestamp: item.configuration_item_capture_time.clone(),
            result_token: result_token.into(),
            annotation: None,
        }
    }

    /// Attach an annotation, truncated to what AWS Config accepts.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        let mut annotation = annotation.into();
        if annotation.len() > MAX_ANNOTATION_LEN {
            let mut end = MAX_ANNOTATION_LEN;
            while !annotation.is_char_boundary(end) {
                end -= 1;
            }
            annotation.truncate(end);
        }
        self.annotation = Some(annotation);
        self
    }
}
