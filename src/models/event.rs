//! HTTP event declarations, raw and normalized.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One function as declared to the deployment tool.
///
/// Events stay untyped JSON until the normalizer validates them, so that a
/// malformed declaration is reported as a configuration error naming the
/// offending field rather than as a generic parse failure. Non-HTTP events
/// are carried along and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FunctionDefinition {
    #[serde(default)]
    #[schemars(description = "Event declarations; only entries with an `http` key are compiled")]
    pub events: Vec<Value>,
}

/// How the gateway treats request content types without a mapping template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassthroughBehavior {
    #[default]
    Never,
    WhenNoMatch,
    WhenNoTemplates,
}

impl PassthroughBehavior {
    /// Parses the exact gateway spelling, e.g. `WHEN_NO_MATCH`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NEVER" => Some(Self::Never),
            "WHEN_NO_MATCH" => Some(Self::WhenNoMatch),
            "WHEN_NO_TEMPLATES" => Some(Self::WhenNoTemplates),
            _ => None,
        }
    }
}

/// User overrides for the integration request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub passthrough: PassthroughBehavior,
    /// Content type → template body, overlaid on the built-in templates
    pub templates: BTreeMap<String, String>,
}

/// User overrides for the success response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseOptions {
    /// Response header name → source expression
    pub headers: BTreeMap<String, String>,
    /// Replaces the `application/json` success template
    pub template: Option<String>,
}

/// A CORS declaration on a single event, before accumulation per path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDeclaration {
    /// `cors: true`
    Enabled,
    /// `cors: { origins, headers }`; absent lists fall back to the defaults
    Custom {
        origins: Option<Vec<String>>,
        headers: Option<Vec<String>>,
    },
}

/// An authorizer reference as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizerRef {
    pub name: Option<String>,
    pub arn: Option<String>,
}

/// Canonical form of one HTTP event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpEventSpec {
    /// Name of the declaring function
    pub function: String,
    /// Upper-cased HTTP method
    pub method: String,
    pub path: String,
    pub request: Option<RequestOptions>,
    pub response: Option<ResponseOptions>,
    pub cors: Option<CorsDeclaration>,
    pub authorizer: Option<AuthorizerRef>,
    pub private: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_parse() {
        assert_eq!(
            PassthroughBehavior::parse("WHEN_NO_MATCH"),
            Some(PassthroughBehavior::WhenNoMatch)
        );
        assert_eq!(PassthroughBehavior::parse("never"), None);
        assert_eq!(PassthroughBehavior::default(), PassthroughBehavior::Never);
    }

    #[test]
    fn test_passthrough_serializes_in_gateway_spelling() {
        let value = serde_json::to_value(PassthroughBehavior::WhenNoTemplates).unwrap();
        assert_eq!(value, "WHEN_NO_TEMPLATES");
    }

    #[test]
    fn test_function_definition_defaults_events() {
        let definition: FunctionDefinition = serde_json::from_str("{}").unwrap();
        assert!(definition.events.is_empty());
    }
}
