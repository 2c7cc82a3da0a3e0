//! HTTP trigger — path, methods, and invocation settings.

use serde::{Deserialize, Serialize};

use crate::one_or_many::OneOrMany;

/// HTTP trigger declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpEvent {
    pub name: Option<String>,
    pub path: Option<String>,
    pub method: Option<OneOrMany<String>>,
    pub role: Option<String>,
    pub version: Option<String>,
}

/// Canonical HTTP method accepted by the provider gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Head,
    Patch,
}

/// The full method whitelist, in the provider's documented order.
pub const ALL_METHODS: [HttpMethod; 6] = [
    HttpMethod::Get,
    HttpMethod::Put,
    HttpMethod::Post,
    HttpMethod::Delete,
    HttpMethod::Head,
    HttpMethod::Patch,
];

impl HttpMethod {
    /// Parse a method token case-insensitively; unknown tokens yield `None`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "PUT" => Some(Self::Put),
            "POST" => Some(Self::Post),
            "DELETE" => Some(Self::Delete),
            "HEAD" => Some(Self::Head),
            "PATCH" => Some(Self::Patch),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonicalize a method specification against the whitelist.
///
/// An absent spec, an empty sequence, or the single sentinel `"any"`/`"all"`
/// (case-insensitive) expands to [`ALL_METHODS`]. Anything else is
/// upper-cased, filtered to the whitelist, and de-duplicated keeping the
/// first occurrence, so the result is always a duplicate-free subset of the
/// whitelist in input order.
#[must_use]
pub fn normalize_methods(spec: Option<&OneOrMany<String>>) -> Vec<HttpMethod> {
    let tokens = match spec {
        None => return ALL_METHODS.to_vec(),
        Some(OneOrMany::One(token))
            if token.eq_ignore_ascii_case("any") || token.eq_ignore_ascii_case("all") =>
        {
            return ALL_METHODS.to_vec();
        }
        Some(many) if many.is_empty() => return ALL_METHODS.to_vec(),
        Some(spec) => spec.as_slice(),
    };

    let mut methods = Vec::new();
    for token in tokens {
        let Some(method) = HttpMethod::parse(token) else {
            continue;
        };
        if !methods.contains(&method) {
            methods.push(method);
        }
    }
    methods
}
