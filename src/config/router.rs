use {crate::Result, serde::Deserialize};

///
/// Configuration of route matching and registration.
///
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RouterConfig {
    /// What happens when a wildcard segment is registered next to a different
    /// wildcard sibling. The default `reject` fails the registration.
    #[serde(default)]
    pub conflicts: ConflictPolicy,

    /// Whether a request path with a trailing slash still matches the route
    /// without it. The default `ignore` treats `/users/` like `/users`.
    #[serde(default)]
    pub trailing_slash: TrailingSlash,
}

impl RouterConfig {
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Policy for ambiguous wildcard siblings.
///
/// Two parameters with different names, two catch-alls with different names,
/// or a parameter next to a catch-all under the same parent cannot all be
/// reached by a first-match walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Fail the registration with [`ErrorKind::RouteConflict`](crate::ErrorKind::RouteConflict).
    #[default]
    Reject,
    /// Keep every sibling; the earliest registered wildcard of a kind is tried first.
    FirstWins,
}

/// Handling of a trailing `/` on request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    #[default]
    Ignore,
    /// A non-root request path ending in `/` is not found. Catch-all
    /// matches keep the slash in their captured value.
    Strict,
}
