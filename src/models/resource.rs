//! Typed gateway resources emitted into the infrastructure template.
//!
//! Every map is a `BTreeMap` so serialized output depends only on the input
//! declarations, never on hashing or insertion order.

use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;

use super::event::PassthroughBehavior;

/// Resource type of every method and preflight this crate emits
pub const METHOD_RESOURCE_TYPE: &str = "AWS::ApiGateway::Method";

/// `{ "Ref": "<logical id>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Ref {
    #[serde(rename = "Ref")]
    pub logical_id: String,
}

impl Ref {
    pub fn new(logical_id: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
        }
    }
}

/// `{ "Fn::GetAtt": ["<logical id>", "<attribute>"] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct GetAtt {
    #[serde(rename = "Fn::GetAtt")]
    pub target: [String; 2],
}

/// One element of an `Fn::Join` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum JoinPart {
    Literal(String),
    Ref(Ref),
    GetAtt(GetAtt),
}

/// `{ "Fn::Join": ["<separator>", [parts...]] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Join {
    #[serde(rename = "Fn::Join")]
    pub join: (String, Vec<JoinPart>),
}

impl Join {
    /// ARN expression the gateway uses to invoke a Lambda function.
    #[must_use]
    pub fn lambda_invocation_uri(function_logical_id: &str) -> Self {
        Self {
            join: (
                String::new(),
                vec![
                    JoinPart::Literal("arn:aws:apigateway:".to_string()),
                    JoinPart::Ref(Ref::new("AWS::Region")),
                    JoinPart::Literal(":lambda:path/2015-03-31/functions/".to_string()),
                    JoinPart::GetAtt(GetAtt {
                        target: [function_logical_id.to_string(), "Arn".to_string()],
                    }),
                    JoinPart::Literal("/invocations".to_string()),
                ],
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorizationType {
    None,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum IntegrationType {
    /// Lambda backend
    Aws,
    /// No backend call; the gateway answers itself
    Mock,
}

/// Value of a method response parameter.
///
/// Regular methods name the header they pass through, preflight methods
/// only flag the header as present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum ParameterBinding {
    Flag(bool),
    Expression(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct MethodResponse {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_models: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_parameters: Option<BTreeMap<String, ParameterBinding>>,
}

impl MethodResponse {
    /// A response that only declares its status code.
    #[must_use]
    pub const fn status_only(status_code: u16) -> Self {
        Self {
            status_code,
            response_models: None,
            response_parameters: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct IntegrationResponse {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_parameters: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_templates: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Integration {
    #[serde(rename = "Type")]
    pub integration_type: IntegrationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<Join>,
    pub request_templates: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passthrough_behavior: Option<PassthroughBehavior>,
    pub integration_responses: Vec<IntegrationResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct MethodProperties {
    pub authorization_type: AuthorizationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizer_id: Option<Ref>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub api_key_required: bool,
    pub http_method: String,
    pub method_responses: Vec<MethodResponse>,
    pub request_parameters: BTreeMap<String, bool>,
    pub integration: Integration,
    pub resource_id: Ref,
    pub rest_api_id: Ref,
}

/// An `AWS::ApiGateway::Method` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct MethodResource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    pub properties: MethodProperties,
}

impl MethodResource {
    #[must_use]
    pub fn new(properties: MethodProperties) -> Self {
        Self {
            resource_type: METHOD_RESOURCE_TYPE.to_string(),
            depends_on: None,
            properties,
        }
    }
}
