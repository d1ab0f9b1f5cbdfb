use lambda_runtime::tracing::debug;
use serde_json::{Map, Value};

use super::{authorizer, cors, responses, templates};
use crate::models::{ConfigurationError, HttpEventSpec};

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Like [`present`], but `false` and `""` also count as not declared.
pub(crate) fn declared(value: Option<&Value>) -> Option<&Value> {
    present(value).filter(|v| !matches!(v, Value::Bool(false)) && v.as_str() != Some(""))
}

/// Normalizes the `http` entry of one event into its canonical form.
///
/// Accepts either the shorthand string `"GET users/list"` or an object with
/// `method` and `path` plus optional `request`, `response`, `cors`,
/// `authorizer` and `private` settings.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] if the entry has any other shape, lacks a
/// method or path, or if one of its optional settings is malformed.
pub fn normalize(function: &str, http: &Value) -> Result<HttpEventSpec, ConfigurationError> {
    let event = match http {
        Value::String(shorthand) => from_shorthand(function, shorthand)?,
        Value::Object(fields) => from_object(function, fields)?,
        _ => {
            return Err(ConfigurationError::InvalidEventShape {
                function: function.to_string(),
            });
        }
    };

    debug!(
        function = %function,
        method = %event.method,
        path = %event.path,
        cors = event.cors.is_some(),
        "Normalized HTTP event"
    );

    Ok(event)
}

fn from_shorthand(function: &str, shorthand: &str) -> Result<HttpEventSpec, ConfigurationError> {
    let mut tokens = shorthand.split_whitespace();
    let method = tokens
        .next()
        .ok_or_else(|| missing_field(function, "method"))?;
    let path = tokens.next().ok_or_else(|| missing_field(function, "path"))?;

    Ok(bare_event(function, method, path))
}

fn from_object(function: &str, fields: &Map<String, Value>) -> Result<HttpEventSpec, ConfigurationError> {
    let method = required_str(function, fields, "method")?;
    let path = required_str(function, fields, "path")?;

    Ok(HttpEventSpec {
        request: templates::parse_request(function, fields.get("request"))?,
        response: responses::parse_response(function, fields.get("response"))?,
        cors: cors::parse_cors(function, fields.get("cors"))?,
        authorizer: authorizer::parse_authorizer(fields.get("authorizer")),
        private: fields.get("private").and_then(Value::as_bool).unwrap_or(false),
        ..bare_event(function, method, path)
    })
}

fn bare_event(function: &str, method: &str, path: &str) -> HttpEventSpec {
    HttpEventSpec {
        function: function.to_string(),
        method: method.to_uppercase(),
        path: path.to_string(),
        request: None,
        response: None,
        cors: None,
        authorizer: None,
        private: false,
    }
}

fn required_str<'a>(
    function: &str,
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ConfigurationError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| missing_field(function, field))
}

fn missing_field(function: &str, field: &'static str) -> ConfigurationError {
    ConfigurationError::MissingEventField {
        function: function.to_string(),
        field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CorsDeclaration, PassthroughBehavior};
    use serde_json::json;

    #[test]
    fn test_shorthand_matches_object_form() {
        let shorthand = normalize("users", &json!("GET users/list")).unwrap();
        let object = normalize("users", &json!({"method": "GET", "path": "users/list"})).unwrap();
        assert_eq!(shorthand, object);
        assert_eq!(shorthand.method, "GET");
        assert_eq!(shorthand.path, "users/list");
    }

    #[test]
    fn test_method_is_upper_cased() {
        let event = normalize("users", &json!("post users/create")).unwrap();
        assert_eq!(event.method, "POST");

        let event = normalize("users", &json!({"method": "Patch", "path": "users"})).unwrap();
        assert_eq!(event.method, "PATCH");
    }

    #[test]
    fn test_invalid_shape() {
        let err = normalize("users", &json!(42)).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidEventShape {
                function: "users".to_string()
            }
        );
        assert!(err.to_string().contains("http: get users/list"));

        assert!(matches!(
            normalize("users", &json!(["GET", "users"])),
            Err(ConfigurationError::InvalidEventShape { .. })
        ));
    }

    #[test]
    fn test_shorthand_without_path() {
        let err = normalize("users", &json!("GET")).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingEventField { field: "path", .. }
        ));
    }

    #[test]
    fn test_object_without_method() {
        let err = normalize("users", &json!({"path": "users"})).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingEventField { field: "method", .. }
        ));
    }

    #[test]
    fn test_object_options() {
        let event = normalize(
            "users",
            &json!({
                "method": "get",
                "path": "users",
                "private": true,
                "cors": true,
                "authorizer": "authFn",
                "request": {"passThrough": "WHEN_NO_MATCH"}
            }),
        )
        .unwrap();

        assert!(event.private);
        assert_eq!(event.cors, Some(CorsDeclaration::Enabled));
        assert_eq!(
            event.authorizer.and_then(|a| a.name),
            Some("authFn".to_string())
        );
        assert_eq!(
            event.request.map(|r| r.passthrough),
            Some(PassthroughBehavior::WhenNoMatch)
        );
    }

    #[test]
    fn test_declared_skips_falsy_values() {
        for value in [json!(null), json!(false), json!("")] {
            assert!(declared(Some(&value)).is_none(), "{value} should be skipped");
        }
        for value in [json!(true), json!("GET users"), json!({}), json!(0)] {
            assert!(declared(Some(&value)).is_some(), "{value} should be kept");
        }
        assert!(declared(None).is_none());
    }

    #[test]
    fn test_null_options_are_absent() {
        let event = normalize(
            "users",
            &json!({"method": "GET", "path": "users", "request": null, "cors": null}),
        )
        .unwrap();
        assert!(event.request.is_none());
        assert!(event.cors.is_none());
    }
}
