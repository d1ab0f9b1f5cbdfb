//! Method and integration responses.
//!
//! Every method answers with the same status-code ladder. Backend errors are
//! mapped to a status by matching a bracketed tag such as `[404]` in the
//! error text; user settings only ever decorate the 200 entries.

use serde_json::Value;
use std::collections::BTreeMap;

use super::cors::CorsConfig;
use super::event::present;
use super::templates::JSON_CONTENT_TYPE;
use crate::models::resource::{IntegrationResponse, MethodResponse, ParameterBinding};
use crate::models::{ConfigurationError, ResponseOptions};

pub const SUCCESS_STATUS_CODE: u16 = 200;

const ALLOW_ORIGIN_PARAMETER: &str = "method.response.header.Access-Control-Allow-Origin";

/// A non-success status code and the pattern selecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCodeRule {
    pub status_code: u16,
    pub selection_pattern: &'static str,
}

pub const ERROR_STATUS_CODES: [StatusCodeRule; 8] = [
    StatusCodeRule {
        status_code: 400,
        selection_pattern: r".*\[400\].*",
    },
    StatusCodeRule {
        status_code: 401,
        selection_pattern: r".*\[401\].*",
    },
    StatusCodeRule {
        status_code: 403,
        selection_pattern: r".*\[403\].*",
    },
    StatusCodeRule {
        status_code: 404,
        selection_pattern: r".*\[404\].*",
    },
    StatusCodeRule {
        status_code: 422,
        selection_pattern: r".*\[422\].*",
    },
    // Also catches a backend process that died mid-request
    StatusCodeRule {
        status_code: 500,
        selection_pattern: r".*(Process\s?exited\s?before\s?completing\s?request|\[500\]).*",
    },
    StatusCodeRule {
        status_code: 502,
        selection_pattern: r".*\[502\].*",
    },
    StatusCodeRule {
        status_code: 504,
        selection_pattern: r".*\[504\].*",
    },
];

/// Validates the `response` setting of an HTTP event.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] if `response` or `response.headers` is
/// not an object, a header value is not a scalar, or `response.template` is
/// not a string.
pub fn parse_response(
    function: &str,
    value: Option<&Value>,
) -> Result<Option<ResponseOptions>, ConfigurationError> {
    let Some(value) = present(value) else {
        return Ok(None);
    };
    let fields = value
        .as_object()
        .ok_or_else(|| ConfigurationError::ResponseNotObject {
            function: function.to_string(),
        })?;

    let mut options = ResponseOptions::default();

    if let Some(headers) = present(fields.get("headers")) {
        let entries =
            headers
                .as_object()
                .ok_or_else(|| ConfigurationError::ResponseHeadersNotObject {
                    function: function.to_string(),
                })?;

        for (name, source) in entries {
            let source = match source {
                Value::String(s) => s.clone(),
                Value::Number(_) | Value::Bool(_) => source.to_string(),
                _ => {
                    return Err(ConfigurationError::InvalidResponseHeader {
                        function: function.to_string(),
                        header: name.clone(),
                    });
                }
            };
            options.headers.insert(name.clone(), source);
        }
    }

    if let Some(template) = present(fields.get("template")) {
        let template =
            template
                .as_str()
                .ok_or_else(|| ConfigurationError::ResponseTemplateNotString {
                    function: function.to_string(),
                })?;
        options.template = Some(template.to_string());
    }

    Ok(Some(options))
}

/// Builds the full method and integration response lists.
///
/// `cors` is the accumulated CORS state of the method's path, if the method
/// itself enables CORS.
#[must_use]
pub fn build_responses(
    options: Option<&ResponseOptions>,
    cors: Option<&CorsConfig>,
) -> (Vec<MethodResponse>, Vec<IntegrationResponse>) {
    let mut method_parameters = BTreeMap::new();
    let mut integration_parameters = BTreeMap::new();
    let mut integration_templates = BTreeMap::new();

    if let Some(options) = options {
        for (name, source) in &options.headers {
            let parameter = format!("method.response.header.{name}");
            method_parameters.insert(
                parameter.clone(),
                ParameterBinding::Expression(parameter.clone()),
            );
            integration_parameters.insert(parameter, source.clone());
        }
        if let Some(template) = &options.template {
            integration_templates.insert(JSON_CONTENT_TYPE.to_string(), template.clone());
        }
    }

    if let Some(cors) = cors {
        method_parameters.insert(
            ALLOW_ORIGIN_PARAMETER.to_string(),
            ParameterBinding::Expression(ALLOW_ORIGIN_PARAMETER.to_string()),
        );
        integration_parameters.insert(
            ALLOW_ORIGIN_PARAMETER.to_string(),
            cors.method_allow_origin(),
        );
    }

    let mut method_responses = vec![MethodResponse {
        status_code: SUCCESS_STATUS_CODE,
        response_models: Some(BTreeMap::new()),
        response_parameters: Some(method_parameters),
    }];
    let mut integration_responses = vec![IntegrationResponse {
        status_code: SUCCESS_STATUS_CODE,
        selection_pattern: None,
        response_parameters: Some(integration_parameters),
        response_templates: Some(integration_templates),
    }];

    for rule in ERROR_STATUS_CODES {
        method_responses.push(MethodResponse::status_only(rule.status_code));
        integration_responses.push(IntegrationResponse {
            status_code: rule.status_code,
            selection_pattern: Some(rule.selection_pattern.to_string()),
            response_parameters: None,
            response_templates: None,
        });
    }

    (method_responses, integration_responses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_codes(responses: &[MethodResponse]) -> Vec<u16> {
        responses.iter().map(|r| r.status_code).collect()
    }

    #[test]
    fn test_default_ladder() {
        let (methods, integrations) = build_responses(None, None);
        assert_eq!(
            status_codes(&methods),
            [200, 400, 401, 403, 404, 422, 500, 502, 504]
        );
        assert_eq!(integrations.len(), 9);
        assert!(integrations[0].selection_pattern.is_none());
        assert_eq!(
            integrations[1].selection_pattern.as_deref(),
            Some(r".*\[400\].*")
        );
        assert_eq!(methods[0].response_parameters, Some(BTreeMap::new()));
    }

    #[test]
    fn test_custom_headers_only_touch_success_entries() {
        let options = parse_response(
            "get",
            Some(&json!({
                "headers": {"Content-Type": "integration.response.header.Content-Type"},
                "template": "$input.path('$.body')"
            })),
        )
        .unwrap();

        let (methods, integrations) = build_responses(options.as_ref(), None);
        let key = "method.response.header.Content-Type";

        assert_eq!(
            methods[0].response_parameters.as_ref().unwrap()[key],
            ParameterBinding::Expression(key.to_string())
        );
        assert_eq!(
            integrations[0].response_parameters.as_ref().unwrap()[key],
            "integration.response.header.Content-Type"
        );
        assert_eq!(
            integrations[0].response_templates.as_ref().unwrap()["application/json"],
            "$input.path('$.body')"
        );
        assert!(methods[1..].iter().all(|r| r.response_parameters.is_none()));
        assert_eq!(methods.len(), 9);
    }

    #[test]
    fn test_cors_adds_allow_origin() {
        let cors = CorsConfig {
            origins: vec!["*".to_string()],
            headers: vec![],
            methods: vec!["OPTIONS".to_string(), "GET".to_string()],
        };
        let (methods, integrations) = build_responses(None, Some(&cors));

        assert_eq!(
            methods[0].response_parameters.as_ref().unwrap()[ALLOW_ORIGIN_PARAMETER],
            ParameterBinding::Expression(ALLOW_ORIGIN_PARAMETER.to_string())
        );
        assert_eq!(
            integrations[0].response_parameters.as_ref().unwrap()[ALLOW_ORIGIN_PARAMETER],
            "'*'"
        );
    }

    #[test]
    fn test_scalar_header_values_are_stringified() {
        let options =
            parse_response("get", Some(&json!({"headers": {"X-Retry": 3}}))).unwrap().unwrap();
        assert_eq!(options.headers["X-Retry"], "3");
    }

    #[test]
    fn test_invalid_response_settings() {
        assert!(matches!(
            parse_response("get", Some(&json!("text"))),
            Err(ConfigurationError::ResponseNotObject { .. })
        ));
        assert!(matches!(
            parse_response("get", Some(&json!({"headers": ["X-A"]}))),
            Err(ConfigurationError::ResponseHeadersNotObject { .. })
        ));
        assert!(matches!(
            parse_response("get", Some(&json!({"headers": {"X-A": {"nested": true}}}))),
            Err(ConfigurationError::InvalidResponseHeader { .. })
        ));
        assert!(matches!(
            parse_response("get", Some(&json!({"template": 5}))),
            Err(ConfigurationError::ResponseTemplateNotString { .. })
        ));
    }
}
