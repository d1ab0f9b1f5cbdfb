use anyhow::{Context as _, Result};
use lambda_runtime::tracing::{debug, error, info};
use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::Value;

use crate::compile::compile_methods;
use crate::config::CompilerConfig;
use crate::lookup::{FunctionLookup, LambdaNamingConvention, Lookups};
use crate::models::{CompileRequest, CompiledMethods};

/// Parses a compile request, unwrapping an API Gateway `body` string if present.
///
/// # Errors
///
/// Returns an error if the body is not valid JSON or the payload does not
/// match [`CompileRequest`].
pub fn parse_request(payload: Value) -> Result<CompileRequest> {
    let payload = match payload.get("body").and_then(Value::as_str) {
        Some(body) => serde_json::from_str(body).context("Request body is not valid JSON")?,
        None => payload,
    };

    serde_json::from_value(payload).context("Payload is not a valid compile request")
}

/// Runs one compilation pass for a parsed request.
///
/// Settings missing from the request are read from the environment.
///
/// # Errors
///
/// Returns a `Diagnostic` with `error_type` `ConfigurationError` for an
/// invalid declaration, or `CompileError` for an unknown path, function or
/// authorizer.
pub fn compile_request(request: &CompileRequest) -> Result<CompiledMethods, Diagnostic> {
    let config = request
        .config
        .clone()
        .unwrap_or_else(CompilerConfig::from_env);

    let functions = request.function_logical_ids.as_ref().map_or(
        &LambdaNamingConvention as &dyn FunctionLookup,
        |ids| ids as &dyn FunctionLookup,
    );
    let lookups = Lookups::new(&request.resource_logical_ids, functions);

    let mut output = CompiledMethods::default();
    compile_methods(&request.functions, lookups, &config, &mut output).map_err(|e| {
        error!(error = %e, "Compilation failed");
        Diagnostic {
            error_type: e.error_type().to_string(),
            error_message: e.to_string(),
        }
    })?;

    Ok(output)
}

/// Lambda event handler. Compiles the HTTP events in the payload into
/// gateway method resources.
/// Logs the full payload when `RUST_LOG=debug/trace`, only a summary otherwise.
///
/// # Errors
///
/// Returns a `Diagnostic` error with one of the following types:
///
/// - `InvalidInput`: The payload could not be parsed into a compile request
/// - `ConfigurationError`: An HTTP event declaration is invalid
/// - `CompileError`: A path, function or authorizer could not be resolved
/// - `SerializationError`: The compiled resources could not be serialized
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Diagnostic> {
    let (payload, _context) = event.into_parts();
    debug!(payload = ?payload, "Received compile request");

    let request = parse_request(payload).map_err(|e| {
        // {:#} keeps the cause chain
        error!(error = %format!("{e:#}"), "Failed to parse request");
        Diagnostic {
            error_type: "InvalidInput".to_string(),
            error_message: format!("{e:#}"),
        }
    })?;

    info!(functions = request.functions.len(), "Compiling HTTP events");

    let output = compile_request(&request)?;

    serde_json::to_value(&output).map_err(|e| {
        error!(error = %e, "Failed to serialize response");
        Diagnostic {
            error_type: "SerializationError".to_string(),
            error_message: format!("Failed to serialize response: {e}"),
        }
    })
}
