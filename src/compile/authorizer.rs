use lambda_runtime::tracing::{debug, error};
use serde_json::Value;

use super::event::declared;
use crate::models::resource::{AuthorizationType, Ref};
use crate::models::{AuthorizerRef, CompileError};
use crate::utils::capitalize;

/// How a method is authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    pub authorization_type: AuthorizationType,
    /// Logical id of the referenced authorizer, for `CUSTOM` only
    pub authorizer_logical_id: Option<String>,
}

impl Authorization {
    pub const NONE: Self = Self {
        authorization_type: AuthorizationType::None,
        authorizer_logical_id: None,
    };

    #[must_use]
    pub fn authorizer_ref(&self) -> Option<Ref> {
        self.authorizer_logical_id.as_deref().map(Ref::new)
    }
}

/// Reads the `authorizer` setting: a name, an ARN, or `{ name, arn }`.
///
/// A string containing `:` is taken to be an ARN. `false` and `""` mean no
/// authorizer. Anything else unusable is kept as an empty reference so that
/// resolution fails with the function named.
#[must_use]
pub fn parse_authorizer(value: Option<&Value>) -> Option<AuthorizerRef> {
    match declared(value)? {
        Value::String(reference) if reference.contains(':') => Some(AuthorizerRef {
            name: None,
            arn: Some(reference.clone()),
        }),
        Value::String(name) => Some(AuthorizerRef {
            name: Some(name.clone()),
            arn: None,
        }),
        Value::Object(fields) => Some(AuthorizerRef {
            name: fields.get("name").and_then(Value::as_str).map(str::to_string),
            arn: fields.get("arn").and_then(Value::as_str).map(str::to_string),
        }),
        _ => Some(AuthorizerRef::default()),
    }
}

/// Extracts a function name from an ARN: the last hyphen-separated token of
/// the last colon-separated segment.
///
/// `arn:aws:lambda:us-east-1:123:function:service-dev-authorize` → `authorize`
///
/// This is a naming heuristic. A function whose own name contains hyphens
/// resolves to its final token only.
#[must_use]
pub fn name_from_arn(arn: &str) -> Option<&str> {
    arn.rsplit(':')
        .next()
        .and_then(|segment| segment.rsplit('-').next())
        .filter(|name| !name.is_empty())
}

/// `authorize` → `AuthorizeApiGatewayAuthorizer`
#[must_use]
pub fn authorizer_logical_id(name: &str) -> String {
    format!("{}ApiGatewayAuthorizer", capitalize(name))
}

/// Resolves an event's authorizer reference. An ARN is preferred over a name.
///
/// # Errors
///
/// Returns [`CompileError::UnresolvedAuthorizer`] if no name can be derived.
pub fn resolve(
    function: &str,
    reference: Option<&AuthorizerRef>,
) -> Result<Authorization, CompileError> {
    let Some(reference) = reference else {
        return Ok(Authorization::NONE);
    };

    let name = reference
        .arn
        .as_deref()
        .and_then(name_from_arn)
        .or_else(|| reference.name.as_deref().filter(|name| !name.is_empty()))
        .ok_or_else(|| {
            error!(function = %function, reference = ?reference, "Unable to resolve authorizer");
            CompileError::UnresolvedAuthorizer {
                function: function.to_string(),
                reference: format!("{reference:?}"),
            }
        })?;

    let logical_id = authorizer_logical_id(name);
    debug!(function = %function, authorizer = %logical_id, "Resolved authorizer");

    Ok(Authorization {
        authorization_type: AuthorizationType::Custom,
        authorizer_logical_id: Some(logical_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve_value(value: &Value) -> Result<Authorization, CompileError> {
        resolve("hello", parse_authorizer(Some(value)).as_ref())
    }

    #[test]
    fn test_absent_authorizer() {
        assert_eq!(resolve("hello", None).unwrap(), Authorization::NONE);
        assert!(parse_authorizer(Some(&Value::Null)).is_none());
    }

    #[test]
    fn test_falsy_authorizer_is_absent() {
        for value in [json!(false), json!("")] {
            assert!(parse_authorizer(Some(&value)).is_none());
            assert_eq!(resolve_value(&value).unwrap(), Authorization::NONE);
        }
    }

    #[test]
    fn test_name() {
        let authorization = resolve_value(&json!("myAuthorizerFn")).unwrap();
        assert_eq!(authorization.authorization_type, AuthorizationType::Custom);
        assert_eq!(
            authorization.authorizer_logical_id.as_deref(),
            Some("MyauthorizerfnApiGatewayAuthorizer")
        );
    }

    #[test]
    fn test_arn_resolves_like_name() {
        let by_name = resolve_value(&json!("myAuthorizerFn")).unwrap();
        let by_arn = resolve_value(&json!(
            "arn:aws:lambda:us-east-1:123456789012:function:service-myAuthorizerFn"
        ))
        .unwrap();
        assert_eq!(by_name, by_arn);
    }

    #[test]
    fn test_object_prefers_arn() {
        let authorization = resolve_value(&json!({
            "name": "ignored",
            "arn": "arn:aws:lambda:us-east-1:123456789012:function:svc-dev-checker"
        }))
        .unwrap();
        assert_eq!(
            authorization.authorizer_logical_id.as_deref(),
            Some("CheckerApiGatewayAuthorizer")
        );

        let authorization = resolve_value(&json!({"name": "checker"})).unwrap();
        assert_eq!(
            authorization.authorizer_ref(),
            Some(Ref::new("CheckerApiGatewayAuthorizer"))
        );
    }

    #[test]
    fn test_unresolvable() {
        for value in [json!({}), json!(true), json!(7), json!("arn:aws:lambda:function:")] {
            assert!(
                matches!(
                    resolve_value(&value),
                    Err(CompileError::UnresolvedAuthorizer { .. })
                ),
                "expected failure for {value}"
            );
        }
    }

    #[test]
    fn test_name_from_arn() {
        assert_eq!(name_from_arn("a:b:svc-dev-auth"), Some("auth"));
        assert_eq!(name_from_arn("a:b:auth"), Some("auth"));
        assert_eq!(name_from_arn("a:b:svc-"), None);
    }
}
