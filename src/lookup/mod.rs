use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::utils::upper_first;

/// Resolves a URL path to the logical id of its already-created path resource.
///
/// The resource tree itself belongs to the host tool; this trait lets the
/// compiler read it without owning it, and lets tests supply mocks.
pub trait PathResourceLookup {
    /// Logical id of the path resource, e.g. `ApiGatewayResourceUsersList`.
    fn resource_logical_id(&self, path: &str) -> Option<String>;
}

/// Resolves a function name to the logical id of its backend resource.
pub trait FunctionLookup {
    /// Logical id of the function resource, e.g. `HelloLambdaFunction`.
    fn function_logical_id(&self, function_name: &str) -> Option<String>;
}

impl<S: BuildHasher> PathResourceLookup for HashMap<String, String, S> {
    fn resource_logical_id(&self, path: &str) -> Option<String> {
        self.get(path).cloned()
    }
}

impl<S: BuildHasher> FunctionLookup for HashMap<String, String, S> {
    fn function_logical_id(&self, function_name: &str) -> Option<String> {
        self.get(function_name).cloned()
    }
}

/// The deployment tool's naming scheme for function resources:
/// `hello` → `HelloLambdaFunction`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LambdaNamingConvention;

impl FunctionLookup for LambdaNamingConvention {
    fn function_logical_id(&self, function_name: &str) -> Option<String> {
        (!function_name.is_empty()).then(|| format!("{}LambdaFunction", upper_first(function_name)))
    }
}

/// The two lookups a compilation pass needs.
#[derive(Clone, Copy)]
pub struct Lookups<'a> {
    pub paths: &'a dyn PathResourceLookup,
    pub functions: &'a dyn FunctionLookup,
}

impl<'a> Lookups<'a> {
    pub const fn new(
        paths: &'a dyn PathResourceLookup,
        functions: &'a dyn FunctionLookup,
    ) -> Self {
        Self { paths, functions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_convention() {
        assert_eq!(
            LambdaNamingConvention.function_logical_id("helloWorld"),
            Some("HelloWorldLambdaFunction".to_string())
        );
        assert_eq!(LambdaNamingConvention.function_logical_id(""), None);
    }

    #[test]
    fn test_hash_map_lookups() {
        let paths = HashMap::from([("users".to_string(), "ApiGatewayResourceUsers".to_string())]);
        assert_eq!(
            paths.resource_logical_id("users"),
            Some("ApiGatewayResourceUsers".to_string())
        );
        assert_eq!(paths.resource_logical_id("items"), None);
    }
}
