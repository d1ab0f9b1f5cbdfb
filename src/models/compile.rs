//! Payloads of the compile service and the shared output document.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

use super::event::FunctionDefinition;
use super::resource::MethodResource;
use crate::config::CompilerConfig;

/// Input of the compile service
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    #[schemars(description = "Function name to declaration, in declaration order")]
    pub functions: IndexMap<String, FunctionDefinition>,
    #[schemars(description = "URL path to the logical id of its existing path resource")]
    pub resource_logical_ids: HashMap<String, String>,
    #[serde(default)]
    #[schemars(
        description = "Function name to backend logical id; defaults to <Name>LambdaFunction"
    )]
    pub function_logical_ids: Option<HashMap<String, String>>,
    #[serde(default)]
    #[schemars(description = "Compiler settings; defaults come from the Lambda environment")]
    pub config: Option<CompilerConfig>,
}

/// Resources produced by one compilation pass, plus the method ids that
/// deployment ordering must wait on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompiledMethods {
    pub resources: BTreeMap<String, MethodResource>,
    pub method_dependencies: Vec<String>,
}

impl CompiledMethods {
    /// Whether a resource with this logical id has been registered.
    #[must_use]
    pub fn contains(&self, logical_id: &str) -> bool {
        self.resources.contains_key(logical_id)
    }

    /// Registers a method resource and records it as a deployment dependency.
    /// An existing resource with the same logical id is replaced and keeps
    /// its place in the dependency list.
    pub fn register_method(&mut self, logical_id: String, resource: MethodResource) {
        if !self.method_dependencies.contains(&logical_id) {
            self.method_dependencies.push(logical_id.clone());
        }
        self.resources.insert(logical_id, resource);
    }

    /// Registers a preflight resource. Preflights are not deployment dependencies.
    pub fn register_preflight(&mut self, logical_id: String, resource: MethodResource) {
        self.resources.insert(logical_id, resource);
    }

    /// Moves the results of another pass into this one, as if its methods
    /// and preflights had been registered here in order.
    pub fn absorb(&mut self, other: Self) {
        for logical_id in other.method_dependencies {
            if !self.method_dependencies.contains(&logical_id) {
                self.method_dependencies.push(logical_id);
            }
        }
        self.resources.extend(other.resources);
    }

    /// Adds every resource to a template's `Resources` object, leaving
    /// unrelated entries in place.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource fails to serialize.
    pub fn merge_into(&self, template_resources: &mut Map<String, Value>) -> serde_json::Result<()> {
        for (logical_id, resource) in &self.resources {
            template_resources.insert(logical_id.clone(), serde_json::to_value(resource)?);
        }
        Ok(())
    }
}
