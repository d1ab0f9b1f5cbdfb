use lambda_runtime::tracing::debug;
use std::collections::BTreeMap;

use super::cors::{CorsConfig, OPTIONS_METHOD};
use super::responses::SUCCESS_STATUS_CODE;
use super::templates::JSON_CONTENT_TYPE;
use crate::models::resource::{
    AuthorizationType, Integration, IntegrationResponse, IntegrationType, MethodProperties,
    MethodResource, MethodResponse, ParameterBinding, Ref,
};
use crate::utils::resource_id_suffix;

const ALLOW_ORIGIN: &str = "method.response.header.Access-Control-Allow-Origin";
const ALLOW_HEADERS: &str = "method.response.header.Access-Control-Allow-Headers";
const ALLOW_METHODS: &str = "method.response.header.Access-Control-Allow-Methods";

/// `ApiGatewayResourceUsersList` → `ApiGatewayMethodUsersListOptions`
#[must_use]
pub fn preflight_logical_id(resource_logical_id: &str) -> String {
    format!(
        "ApiGatewayMethod{}Options",
        resource_id_suffix(resource_logical_id)
    )
}

/// Builds the `OPTIONS` method answering browser preflight requests for one
/// path. The integration is a mock: the gateway replies with the
/// accumulated CORS values without invoking any backend.
#[must_use]
pub fn emit(
    resource_logical_id: &str,
    rest_api_logical_id: &str,
    cors: &CorsConfig,
) -> MethodResource {
    debug!(
        resource = %resource_logical_id,
        methods = ?cors.methods,
        "Emitting preflight method"
    );

    let method_parameters: BTreeMap<_, _> = [ALLOW_ORIGIN, ALLOW_HEADERS, ALLOW_METHODS]
        .into_iter()
        .map(|header| (header.to_string(), ParameterBinding::Flag(true)))
        .collect();

    let integration_parameters = BTreeMap::from([
        (ALLOW_ORIGIN.to_string(), cors.preflight_allow_origin()),
        (ALLOW_HEADERS.to_string(), cors.preflight_allow_headers()),
        (ALLOW_METHODS.to_string(), cors.preflight_allow_methods()),
    ]);

    let integration = Integration {
        integration_type: IntegrationType::Mock,
        integration_http_method: None,
        uri: None,
        request_templates: BTreeMap::from([(
            JSON_CONTENT_TYPE.to_string(),
            "{statusCode:200}".to_string(),
        )]),
        passthrough_behavior: None,
        integration_responses: vec![IntegrationResponse {
            status_code: SUCCESS_STATUS_CODE,
            selection_pattern: None,
            response_parameters: Some(integration_parameters),
            response_templates: Some(BTreeMap::from([(
                JSON_CONTENT_TYPE.to_string(),
                String::new(),
            )])),
        }],
    };

    MethodResource::new(MethodProperties {
        authorization_type: AuthorizationType::None,
        authorizer_id: None,
        api_key_required: false,
        http_method: OPTIONS_METHOD.to_string(),
        method_responses: vec![MethodResponse {
            status_code: SUCCESS_STATUS_CODE,
            response_models: Some(BTreeMap::new()),
            response_parameters: Some(method_parameters),
        }],
        request_parameters: BTreeMap::new(),
        integration,
        resource_id: Ref::new(resource_logical_id),
        rest_api_id: Ref::new(rest_api_logical_id),
    })
}
