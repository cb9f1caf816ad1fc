//! Introspection results: route descriptors and lookup outcomes.

use {
    crate::{Method, PathParams},
    serde::Serialize,
    std::fmt,
};

/// A registered (method, path) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub method: Method,
    /// Registration path, wildcards included (`/users/:id`).
    pub path: String,
}

impl RouteDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// A route matched by path and method.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Registration path of the matched node.
    pub route: String,
    /// Extracted path parameters.
    pub params: PathParams,
}

impl RouteMatch {
    /// Get a parameter value by name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// Result of attempting to locate a route by path and method.
#[derive(Debug, Clone)]
pub enum RouteLookup {
    /// A route matched by path and method.
    Match(RouteMatch),
    /// Path matched, but method is not allowed.
    MethodNotAllowed { allowed: AllowedMethods },
    /// No route matched the path.
    NotFound,
}

/// Methods registered on a matched path.
///
/// Inserted into the request extensions before the method-not-allowed
/// handler runs, so custom handlers can answer with an `Allow` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedMethods {
    methods: Vec<Method>,
}

impl AllowedMethods {
    /// Sorts and de-duplicates for stable output.
    #[must_use]
    pub fn new(mut methods: Vec<Method>) -> Self {
        methods.sort();
        methods.dedup();
        Self { methods }
    }

    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    #[must_use]
    pub fn contains(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    /// Format as an HTTP Allow header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        let mut out = String::new();
        for (idx, method) in self.methods.iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            out.push_str(method.as_str());
        }
        out
    }
}
