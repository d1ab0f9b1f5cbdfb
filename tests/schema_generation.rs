// Tests for the compile service schema
#![allow(clippy::unwrap_used)]

use apigw_methods::schema::{SERVICE_NAME, service_schema};

#[test]
fn test_schema_generation() {
    let schema = service_schema().unwrap();

    assert_eq!(schema["name"], SERVICE_NAME);
    assert!(schema["description"].as_str().is_some_and(|d| !d.is_empty()));
    assert!(schema["inputSchema"].is_object());
    assert!(schema["outputSchema"].is_object());
}

#[test]
fn test_input_schema_properties() {
    let schema = service_schema().unwrap();
    let input = &schema["inputSchema"];

    assert!(input.get("$schema").is_none());
    assert!(input.get("title").is_none());

    let properties = input["properties"].as_object().unwrap();
    for field in ["functions", "resourceLogicalIds", "functionLogicalIds", "config"] {
        assert!(properties.contains_key(field), "missing {field}");
    }

    let required: Vec<&str> = input["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert!(required.contains(&"functions"));
    assert!(required.contains(&"resourceLogicalIds"));
}

#[test]
fn test_output_schema_properties() {
    let schema = service_schema().unwrap();
    let properties = schema["outputSchema"]["properties"].as_object().unwrap();

    assert!(properties.contains_key("resources"));
    assert!(properties.contains_key("methodDependencies"));
}
