//! Integration request templates.
//!
//! The built-in templates reshape an inbound request into the single JSON
//! envelope the backend function receives: body, method, principal, stage,
//! headers, query string, path parameters, caller identity and stage
//! variables. User templates replace them per content type.

use serde_json::Value;
use std::collections::BTreeMap;

use super::event::present;
use crate::models::{ConfigurationError, PassthroughBehavior, RequestOptions};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_URL_ENCODED_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const DEFAULT_JSON_REQUEST_TEMPLATE: &str = r##"
#define( $loop )
  {
  #foreach($key in $map.keySet())
      "$util.escapeJavaScript($key)":
        "$util.escapeJavaScript($map.get($key))"
        #if( $foreach.hasNext ) , #end
  #end
  }
#end

{
  "body": $input.json("$"),
  "method": "$context.httpMethod",
  "principalId": "$context.authorizer.principalId",
  "stage": "$context.stage",

  #set( $map = $input.params().header )
  "headers": $loop,

  #set( $map = $input.params().querystring )
  "query": $loop,

  #set( $map = $input.params().path )
  "path": $loop,

  #set( $map = $context.identity )
  "identity": $loop,

  #set( $map = $stageVariables )
  "stageVariables": $loop
}
"##;

pub const DEFAULT_FORM_URL_ENCODED_REQUEST_TEMPLATE: &str = r##"
#define( $body )
  {
  #foreach( $token in $input.path('$').split('&') )
    #set( $keyVal = $token.split('=') )
    #set( $keyValSize = $keyVal.size() )
    #if( $keyValSize >= 1 )
      #set( $key = $util.urlDecode($keyVal[0]) )
      #if( $keyValSize >= 2 )
        #set( $val = $util.urlDecode($keyVal[1]) )
      #else
        #set( $val = '' )
      #end
      "$key": "$val"#if($foreach.hasNext),#end
    #end
  #end
  }
#end

#define( $loop )
  {
  #foreach($key in $map.keySet())
      "$util.escapeJavaScript($key)":
        "$util.escapeJavaScript($map.get($key))"
        #if( $foreach.hasNext ) , #end
  #end
  }
#end

{
  "body": $body,
  "method": "$context.httpMethod",
  "principalId": "$context.authorizer.principalId",
  "stage": "$context.stage",

  #set( $map = $input.params().header )
  "headers": $loop,

  #set( $map = $input.params().querystring )
  "query": $loop,

  #set( $map = $input.params().path )
  "path": $loop,

  #set( $map = $context.identity )
  "identity": $loop,

  #set( $map = $stageVariables )
  "stageVariables": $loop
}
"##;

/// Validates the `request` setting of an HTTP event.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] if `request` or `request.template` is not
/// an object, a template body is not a string, or `request.passThrough` is
/// not one of the accepted behaviors.
pub fn parse_request(
    function: &str,
    value: Option<&Value>,
) -> Result<Option<RequestOptions>, ConfigurationError> {
    let Some(value) = present(value) else {
        return Ok(None);
    };
    let fields = value
        .as_object()
        .ok_or_else(|| ConfigurationError::RequestNotObject {
            function: function.to_string(),
        })?;

    let mut options = RequestOptions::default();

    if let Some(template) = present(fields.get("template")) {
        let entries = template
            .as_object()
            .ok_or_else(|| ConfigurationError::TemplateNotObject {
                function: function.to_string(),
            })?;

        for (content_type, body) in entries {
            let body = body
                .as_str()
                .ok_or_else(|| ConfigurationError::TemplateNotString {
                    function: function.to_string(),
                    content_type: content_type.clone(),
                })?;
            options.templates.insert(content_type.clone(), body.to_string());
        }
    }

    if let Some(pass_through) = present(fields.get("passThrough")) {
        options.passthrough = pass_through
            .as_str()
            .and_then(PassthroughBehavior::parse)
            .ok_or_else(|| ConfigurationError::InvalidPassThrough {
                value: pass_through
                    .as_str()
                    .map_or_else(|| pass_through.to_string(), str::to_string),
            })?;
    }

    Ok(Some(options))
}

/// Built-in templates with the user's templates overlaid by content type.
#[must_use]
pub fn request_templates(options: Option<&RequestOptions>) -> BTreeMap<String, String> {
    let mut templates = BTreeMap::from([
        (
            JSON_CONTENT_TYPE.to_string(),
            DEFAULT_JSON_REQUEST_TEMPLATE.to_string(),
        ),
        (
            FORM_URL_ENCODED_CONTENT_TYPE.to_string(),
            DEFAULT_FORM_URL_ENCODED_REQUEST_TEMPLATE.to_string(),
        ),
    ]);

    if let Some(options) = options {
        templates.extend(options.templates.clone());
    }

    templates
}

#[must_use]
pub fn passthrough_behavior(options: Option<&RequestOptions>) -> PassthroughBehavior {
    options.map(|o| o.passthrough).unwrap_or_default()
}
