//! Compiler settings.
//!
//! Settings arrive with each compile request or, when omitted, from the
//! Lambda function's environment.

use lambda_runtime::tracing::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Logical id of the REST API every method belongs to
pub const DEFAULT_REST_API_LOGICAL_ID: &str = "ApiGatewayRestApi";

const REST_API_LOGICAL_ID_ENV: &str = "REST_API_LOGICAL_ID";
const REJECT_DUPLICATE_METHODS_ENV: &str = "REJECT_DUPLICATE_METHODS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    #[schemars(description = "Logical id of the REST API resource")]
    pub rest_api_logical_id: String,
    #[schemars(
        description = "Reject a path and method declared twice instead of keeping the last one"
    )]
    pub reject_duplicate_methods: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            rest_api_logical_id: DEFAULT_REST_API_LOGICAL_ID.to_string(),
            reject_duplicate_methods: true,
        }
    }
}

impl CompilerConfig {
    /// Reads `REST_API_LOGICAL_ID` and `REJECT_DUPLICATE_METHODS`, falling
    /// back to the defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(id) = lookup(REST_API_LOGICAL_ID_ENV).filter(|id| !id.trim().is_empty()) {
            config.rest_api_logical_id = id.trim().to_string();
        }

        if let Some(raw) = lookup(REJECT_DUPLICATE_METHODS_ENV) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => config.reject_duplicate_methods = true,
                "false" | "0" | "no" => config.reject_duplicate_methods = false,
                other => warn!(
                    value = %other,
                    "Ignoring unrecognized {REJECT_DUPLICATE_METHODS_ENV} value"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, CompilerConfig::default());
        assert_eq!(config.rest_api_logical_id, "ApiGatewayRestApi");
        assert!(config.reject_duplicate_methods);
    }

    #[test]
    fn test_environment_overrides() {
        let config = CompilerConfig::from_lookup(lookup_from(&[
            ("REST_API_LOGICAL_ID", " SharedRestApi "),
            ("REJECT_DUPLICATE_METHODS", "False"),
        ]));
        assert_eq!(config.rest_api_logical_id, "SharedRestApi");
        assert!(!config.reject_duplicate_methods);
    }

    #[test]
    fn test_unrecognized_flag_keeps_default() {
        let config =
            CompilerConfig::from_lookup(lookup_from(&[("REJECT_DUPLICATE_METHODS", "maybe")]));
        assert!(config.reject_duplicate_methods);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CompilerConfig =
            serde_json::from_str(r#"{"rejectDuplicateMethods": false}"#).unwrap();
        assert_eq!(config.rest_api_logical_id, "ApiGatewayRestApi");
        assert!(!config.reject_duplicate_methods);
    }
}
