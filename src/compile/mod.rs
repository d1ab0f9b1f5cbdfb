//! Compilation of HTTP event declarations into gateway method resources.
//!
//! The pass runs in two phases. The first walks every function's events in
//! declaration order, emitting one method resource per event while
//! accumulating CORS state per path. The second emits one preflight
//! `OPTIONS` method for every path that accumulated CORS state.

pub mod authorizer;
pub mod cors;
pub mod event;
pub mod method;
pub mod preflight;
pub mod responses;
pub mod templates;

use indexmap::IndexMap;
use lambda_runtime::tracing::{info, warn};
use serde_json::Value;
use std::collections::HashSet;

pub use cors::{CorsAccumulator, CorsConfig};
pub use method::MethodTargets;

use crate::config::CompilerConfig;
use crate::lookup::Lookups;
use crate::models::{
    CompileError, CompiledMethods, ConfigurationError, FunctionDefinition, HttpEventSpec,
};

/// Compiles every HTTP event of `functions` into `output`.
///
/// Functions and their events are processed in the given order; later CORS
/// declarations on a path win conflicts with earlier ones. Resources already
/// in `output` are kept, and `output` is left untouched when the pass fails.
///
/// # Errors
///
/// Returns the first error met: a [`ConfigurationError`] for a malformed
/// declaration or a duplicate path and method (when
/// [`CompilerConfig::reject_duplicate_methods`] is set), or a lookup failure
/// for a path or function the host tool does not know.
pub fn compile_methods(
    functions: &IndexMap<String, FunctionDefinition>,
    lookups: Lookups<'_>,
    config: &CompilerConfig,
    output: &mut CompiledMethods,
) -> Result<(), CompileError> {
    let mut compiler = MethodCompiler::new(lookups, config);

    for (function, definition) in functions {
        for http in definition.events.iter().filter_map(http_entry) {
            compiler.compile_event(function, http)?;
        }
    }

    compiler.emit_preflights()?;

    info!(
        methods = compiler.declared.len(),
        preflights = compiler.cors.len(),
        "Compiled HTTP events"
    );

    output.absorb(compiler.output);
    Ok(())
}

// `http: null`, `false` and `""` declare nothing
fn http_entry(event: &Value) -> Option<&Value> {
    event::declared(event.get("http"))
}

struct MethodCompiler<'a> {
    lookups: Lookups<'a>,
    config: &'a CompilerConfig,
    cors: CorsAccumulator,
    declared: HashSet<String>,
    output: CompiledMethods,
}

impl<'a> MethodCompiler<'a> {
    fn new(lookups: Lookups<'a>, config: &'a CompilerConfig) -> Self {
        Self {
            lookups,
            config,
            cors: CorsAccumulator::new(),
            declared: HashSet::new(),
            output: CompiledMethods::default(),
        }
    }

    fn compile_event(&mut self, function: &str, http: &Value) -> Result<(), CompileError> {
        let event = event::normalize(function, http)?;
        let resource_logical_id = self.resource_logical_id(&event.path)?;
        let logical_id = method::method_logical_id(&resource_logical_id, &event.method);

        if !self.declared.insert(logical_id.clone()) {
            self.on_duplicate(&event)?;
        }

        let cors = event
            .cors
            .as_ref()
            .map(|declaration| self.cors.contribute(&event.path, &event.method, declaration));

        let function_logical_id = self
            .lookups
            .functions
            .function_logical_id(function)
            .ok_or_else(|| CompileError::UnknownFunction {
                function: function.to_string(),
            })?;

        let targets = MethodTargets {
            resource_logical_id: &resource_logical_id,
            function_logical_id: &function_logical_id,
            rest_api_logical_id: &self.config.rest_api_logical_id,
        };
        let resource = method::assemble(&event, targets, cors)?;

        self.output.register_method(logical_id, resource);
        Ok(())
    }

    fn on_duplicate(&self, event: &HttpEventSpec) -> Result<(), ConfigurationError> {
        if self.config.reject_duplicate_methods {
            return Err(ConfigurationError::DuplicateMethod {
                function: event.function.clone(),
                method: event.method.clone(),
                path: event.path.clone(),
            });
        }

        warn!(
            function = %event.function,
            method = %event.method,
            path = %event.path,
            "Path and method declared more than once; keeping the last declaration"
        );
        Ok(())
    }

    fn emit_preflights(&mut self) -> Result<(), CompileError> {
        for (path, cors) in self.cors.iter() {
            let resource_logical_id = self.resource_logical_id(path)?;
            let resource = preflight::emit(
                &resource_logical_id,
                &self.config.rest_api_logical_id,
                cors,
            );
            self.output
                .register_preflight(preflight::preflight_logical_id(&resource_logical_id), resource);
        }
        Ok(())
    }

    fn resource_logical_id(&self, path: &str) -> Result<String, CompileError> {
        self.lookups
            .paths
            .resource_logical_id(path)
            .ok_or_else(|| CompileError::UnknownPath {
                path: path.to_string(),
            })
    }
}
