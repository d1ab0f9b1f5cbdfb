//! JSON schemas of the compile service payloads.

use schemars::{JsonSchema, schema_for};
use serde_json::{Value, json};

use crate::models::{CompileRequest, CompiledMethods};

/// Name the compile service is published under
pub const SERVICE_NAME: &str = "compile_http_methods";

const SERVICE_DESCRIPTION: &str = "Compile HTTP event declarations of serverless functions into \
    API Gateway method resources, including merged CORS preflight methods per path.";

/// Describes the service as `{ name, description, inputSchema, outputSchema }`.
///
/// # Errors
///
/// Returns an error if a schema fails to serialize.
pub fn service_schema() -> serde_json::Result<Value> {
    Ok(json!({
        "name": SERVICE_NAME,
        "description": SERVICE_DESCRIPTION,
        "inputSchema": clean_schema::<CompileRequest>()?,
        "outputSchema": clean_schema::<CompiledMethods>()?,
    }))
}

// Drops the top-level metadata tooling does not need
fn clean_schema<T: JsonSchema>() -> serde_json::Result<Value> {
    let mut schema = serde_json::to_value(schema_for!(T))?;
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    Ok(schema)
}
