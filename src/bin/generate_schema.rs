//! Schema generator for the compile service.
//!
//! This binary writes `compile_schema.json`, describing the request and
//! response payloads of the compile Lambda so deployment tooling can
//! validate requests before invoking it.

use anyhow::{Context, Result};
use std::fs;

const OUTPUT_FILE: &str = "compile_schema.json";

fn main() -> Result<()> {
    let schema = apigw_methods::schema::service_schema().context("Failed to build schema")?;
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;

    fs::write(OUTPUT_FILE, json).with_context(|| format!("Failed to write {OUTPUT_FILE}"))?;
    println!("✅ Generated {OUTPUT_FILE}");
    Ok(())
}
