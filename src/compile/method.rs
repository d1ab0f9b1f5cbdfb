use std::collections::BTreeMap;

use super::authorizer;
use super::cors::CorsConfig;
use super::responses::build_responses;
use super::templates::{passthrough_behavior, request_templates};
use crate::models::resource::{
    Integration, IntegrationType, Join, MethodProperties, MethodResource, Ref,
};
use crate::models::{CompileError, HttpEventSpec};
use crate::utils::{capitalize, resource_id_suffix};

/// Logical ids a method resource points at.
#[derive(Debug, Clone, Copy)]
pub struct MethodTargets<'a> {
    pub resource_logical_id: &'a str,
    pub function_logical_id: &'a str,
    pub rest_api_logical_id: &'a str,
}

/// `ApiGatewayResourceUsersList` + `get` → `ApiGatewayMethodUsersListGet`
#[must_use]
pub fn method_logical_id(resource_logical_id: &str, method: &str) -> String {
    format!(
        "ApiGatewayMethod{}{}",
        resource_id_suffix(resource_logical_id),
        capitalize(method)
    )
}

/// Builds the method resource for one normalized event.
///
/// `cors` is the path's accumulated CORS state when this event enables CORS.
///
/// # Errors
///
/// Returns [`CompileError::UnresolvedAuthorizer`] if the event references an
/// authorizer whose name cannot be derived.
pub fn assemble(
    event: &HttpEventSpec,
    targets: MethodTargets<'_>,
    cors: Option<&CorsConfig>,
) -> Result<MethodResource, CompileError> {
    let authorization = authorizer::resolve(&event.function, event.authorizer.as_ref())?;
    let (method_responses, integration_responses) =
        build_responses(event.response.as_ref(), cors);

    let integration = Integration {
        integration_type: IntegrationType::Aws,
        integration_http_method: Some("POST".to_string()),
        uri: Some(Join::lambda_invocation_uri(targets.function_logical_id)),
        request_templates: request_templates(event.request.as_ref()),
        passthrough_behavior: Some(passthrough_behavior(event.request.as_ref())),
        integration_responses,
    };

    let mut resource = MethodResource::new(MethodProperties {
        authorization_type: authorization.authorization_type,
        authorizer_id: authorization.authorizer_ref(),
        api_key_required: event.private,
        http_method: event.method.clone(),
        method_responses,
        request_parameters: BTreeMap::new(),
        integration,
        resource_id: Ref::new(targets.resource_logical_id),
        rest_api_id: Ref::new(targets.rest_api_logical_id),
    });
    resource.depends_on = authorization.authorizer_logical_id;

    Ok(resource)
}
