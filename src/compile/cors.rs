//! Per-path CORS accumulation.
//!
//! Several events may declare CORS on the same path with different methods.
//! Each contribution is merged into one [`CorsConfig`] per path, in
//! declaration order, and the preflight emitter later turns every
//! accumulated path into a single `OPTIONS` method.

use indexmap::IndexMap;
use indexmap::map::Entry;
use lambda_runtime::tracing::debug;
use serde_json::Value;

use super::event::present;
use crate::models::{ConfigurationError, CorsDeclaration};

pub const OPTIONS_METHOD: &str = "OPTIONS";
pub const DEFAULT_ORIGIN: &str = "*";
pub const DEFAULT_ALLOWED_HEADERS: [&str; 5] = [
    "Content-Type",
    "X-Amz-Date",
    "Authorization",
    "X-Api-Key",
    "X-Amz-Security-Token",
];

/// Validates the `cors` setting of an HTTP event.
///
/// `true` enables the defaults, `false` and absence disable CORS.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] if `cors` is neither a boolean nor an
/// object, or if its `origins` or `headers` are not arrays of strings.
pub fn parse_cors(
    function: &str,
    value: Option<&Value>,
) -> Result<Option<CorsDeclaration>, ConfigurationError> {
    match present(value) {
        None | Some(Value::Bool(false)) => Ok(None),
        Some(Value::Bool(true)) => Ok(Some(CorsDeclaration::Enabled)),
        Some(Value::Object(fields)) => Ok(Some(CorsDeclaration::Custom {
            origins: string_list(function, "origins", fields.get("origins"))?,
            headers: string_list(function, "headers", fields.get("headers"))?,
        })),
        Some(_) => Err(ConfigurationError::InvalidCors {
            function: function.to_string(),
        }),
    }
}

fn string_list(
    function: &str,
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<Vec<String>>, ConfigurationError> {
    present(value)
        .map(|value| {
            value
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|item| item.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or_else(|| ConfigurationError::CorsValuesNotArray {
                    function: function.to_string(),
                    field,
                })
        })
        .transpose()
}

/// CORS settings for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub origins: Vec<String>,
    pub headers: Vec<String>,
    /// Always contains `OPTIONS` and every contributing method, without duplicates
    pub methods: Vec<String>,
}

impl CorsConfig {
    /// The contribution of a single event declaring `method`.
    #[must_use]
    pub fn for_method(declaration: &CorsDeclaration, method: &str) -> Self {
        let (origins, headers) = match declaration {
            CorsDeclaration::Enabled => (None, None),
            CorsDeclaration::Custom { origins, headers } => (origins.clone(), headers.clone()),
        };

        let mut methods = vec![OPTIONS_METHOD.to_string()];
        let method = method.to_uppercase();
        if !methods.contains(&method) {
            methods.push(method);
        }

        Self {
            origins: origins.unwrap_or_else(|| vec![DEFAULT_ORIGIN.to_string()]),
            headers: headers
                .unwrap_or_else(|| Vec::from(DEFAULT_ALLOWED_HEADERS.map(str::to_string))),
            methods,
        }
    }

    /// Folds a later contribution into this one.
    ///
    /// Methods are unioned in first-seen order. Origins and headers are merged
    /// position by position, the later declaration winning wherever both
    /// have an entry.
    pub fn merge(&mut self, incoming: Self) {
        for method in incoming.methods {
            if !self.methods.contains(&method) {
                self.methods.push(method);
            }
        }
        overlay(&mut self.origins, incoming.origins);
        overlay(&mut self.headers, incoming.headers);
    }

    /// `Access-Control-Allow-Origin` value for a regular method: `'a','b'`
    #[must_use]
    pub fn method_allow_origin(&self) -> String {
        format!("'{}'", self.origins.join("','"))
    }

    /// `Access-Control-Allow-Origin` value for the preflight: `'a,b'`
    #[must_use]
    pub fn preflight_allow_origin(&self) -> String {
        quoted_list(&self.origins)
    }

    #[must_use]
    pub fn preflight_allow_headers(&self) -> String {
        quoted_list(&self.headers)
    }

    #[must_use]
    pub fn preflight_allow_methods(&self) -> String {
        quoted_list(&self.methods)
    }
}

fn quoted_list(values: &[String]) -> String {
    format!("'{}'", values.join(","))
}

fn overlay(target: &mut Vec<String>, incoming: Vec<String>) {
    for (index, value) in incoming.into_iter().enumerate() {
        if let Some(slot) = target.get_mut(index) {
            *slot = value;
        } else {
            target.push(value);
        }
    }
}

/// Running CORS state of every path, in the order paths were first seen.
#[derive(Debug, Clone, Default)]
pub struct CorsAccumulator {
    paths: IndexMap<String, CorsConfig>,
}

impl CorsAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one event's declaration into its path and returns the
    /// accumulated configuration for that path.
    pub fn contribute(
        &mut self,
        path: &str,
        method: &str,
        declaration: &CorsDeclaration,
    ) -> &CorsConfig {
        let incoming = CorsConfig::for_method(declaration, method);

        match self.paths.entry(path.to_string()) {
            Entry::Occupied(entry) => {
                let config = entry.into_mut();
                config.merge(incoming);
                debug!(path = %path, methods = ?config.methods, "Merged CORS declaration");
                config
            }
            Entry::Vacant(entry) => {
                debug!(path = %path, methods = ?incoming.methods, "Started CORS accumulation");
                entry.insert(incoming)
            }
        }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&CorsConfig> {
        self.paths.get(path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CorsConfig)> {
        self.paths.iter().map(|(path, config)| (path.as_str(), config))
    }
}
