//! Error types for the method compiler.
//!
//! User mistakes in an HTTP event declaration surface as [`ConfigurationError`].
//! [`CompileError`] wraps those and adds the failures that come from the
//! lookups the host tool injects, which are not the user's to fix.

use thiserror::Error;

/// Accepted spellings of `request.passThrough`, as shown in error messages.
pub const PASS_THROUGH_CHOICES: &str = "NEVER, WHEN_NO_MATCH, WHEN_NO_TEMPLATES";

/// A user-supplied HTTP event declaration is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error(
        "HTTP event of function {function} is not an object nor a string. \
         The correct syntax is: http: get users/list \
         OR an object with \"path\" and \"method\" properties."
    )]
    InvalidEventShape { function: String },

    #[error("HTTP event of function {function} must declare \"{field}\" as a non-empty string.")]
    MissingEventField {
        function: String,
        field: &'static str,
    },

    #[error("Request config of function {function} must be provided as an object.")]
    RequestNotObject { function: String },

    #[error("Template config of function {function} must be provided as an object.")]
    TemplateNotObject { function: String },

    #[error(
        "Request template for \"{content_type}\" of function {function} must be provided as a string."
    )]
    TemplateNotString {
        function: String,
        content_type: String,
    },

    #[error("Request passThrough \"{value}\" is not one of {choices}", choices = PASS_THROUGH_CHOICES)]
    InvalidPassThrough { value: String },

    #[error("Response config of function {function} must be provided as an object.")]
    ResponseNotObject { function: String },

    #[error("Response headers of function {function} must be provided as an object.")]
    ResponseHeadersNotObject { function: String },

    #[error("Response header \"{header}\" of function {function} must be a string, number or boolean.")]
    InvalidResponseHeader { function: String, header: String },

    #[error("Response template of function {function} must be provided as a string.")]
    ResponseTemplateNotString { function: String },

    #[error("CORS config of function {function} must be either true or an object.")]
    InvalidCors { function: String },

    #[error("CORS {field} values of function {function} must be provided as an array of strings.")]
    CorsValuesNotArray {
        function: String,
        field: &'static str,
    },

    #[error(
        "Function {function} declares {method} {path}, which is already declared. \
         Each path and method pair may only be declared once."
    )]
    DuplicateMethod {
        function: String,
        method: String,
        path: String,
    },
}

/// Compilation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("No resource logical id is registered for path \"{path}\"")]
    UnknownPath { path: String },

    #[error("No logical id is registered for function \"{function}\"")]
    UnknownFunction { function: String },

    #[error("Unable to derive an authorizer name for function {function} from {reference}")]
    UnresolvedAuthorizer { function: String, reference: String },
}

impl CompileError {
    /// Diagnostic category reported by the Lambda handler.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ConfigurationError",
            Self::UnknownPath { .. }
            | Self::UnknownFunction { .. }
            | Self::UnresolvedAuthorizer { .. } => "CompileError",
        }
    }
}
