//! Naming helpers shared by the compile components.

/// Prefix the host tool gives every path resource logical id
pub const PATH_RESOURCE_PREFIX: &str = "ApiGatewayResource";

/// Upper-cases the first character and lower-cases the rest.
///
/// `get` → `Get`, `myAuthorizerFn` → `Myauthorizerfn`
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Upper-cases the first character and keeps the rest as written.
///
/// `helloWorld` → `HelloWorld`
#[must_use]
pub fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Strips the path resource prefix from a logical id.
///
/// Format: `ApiGatewayResourceUsersList` → `UsersList`
#[must_use]
pub fn resource_id_suffix(resource_logical_id: &str) -> &str {
    resource_logical_id
        .strip_prefix(PATH_RESOURCE_PREFIX)
        .unwrap_or(resource_logical_id)
}
