//! The public router facade.
//!
//! [`Router`] owns the segment tree and the fallback handlers. Routes are
//! registered per method, optionally below nested [`RouteGroup`]s that share a
//! path prefix and middleware. Once registration is finished the router is
//! read-only: [`Router::dispatch`] takes `&self` and can run on many threads
//! at once, or the router can be frozen into a tower service with
//! [`Router::into_service`].
//!
//! - [`group`] - Prefix-scoped registration handles
//! - [`lookup`] - Route descriptors and lookup outcomes
//! - [`service`] - `tower::Service` adapter for embedding in a server

mod group;
mod lookup;
mod service;

pub use group::RouteGroup;
pub use lookup::{AllowedMethods, RouteDescriptor, RouteLookup, RouteMatch};
pub use service::RouterService;

use {
    crate::{
        Config, Error, Handler, Method, Middleware, PathParams, Request, ResponseWriter, Result,
        RouterConfig,
        handler::{Fallbacks, handler_fn},
        tree::{Resolution, RouteTree},
    },
    std::sync::Arc,
};

/// Generates the per-method registration shortcuts on a type with a `route` method.
macro_rules! method_shortcuts {
    ($($name:ident => $method:ident, $label:literal;)*) => {
        $(
            #[doc = concat!("Registers a ", $label, " handler for `path`.")]
            pub fn $name<F>(&mut self, path: &str, handler: F) -> Result<&mut Self>
            where
                F: Fn(&mut Request, &mut ResponseWriter) + Send + Sync + 'static,
            {
                self.route(Method::$method, path, handler)
            }
        )*
    };
}

pub(crate) use method_shortcuts;

/// Checks the shape of a registration path or group prefix.
pub(crate) fn validate_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(Error::invalid_path(format!(
            "path must start with '/': '{path}'"
        )));
    }
    if path.len() > 1 && path.ends_with('/') {
        return Err(Error::invalid_path(format!(
            "path must not end with '/': '{path}'"
        )));
    }
    if path.len() > 1 && path[1..].split('/').any(str::is_empty) {
        return Err(Error::invalid_path(format!(
            "path must not contain empty segments: '{path}'"
        )));
    }
    if path.split('/').any(|segment| segment == ":") {
        return Err(Error::invalid_path(format!(
            "parameter segments must be named: '{path}'"
        )));
    }
    Ok(())
}

/// Builder for a [`Router`] with custom fallback handlers or configuration.
///
/// ```rust
/// use forge_router::{Router, RouterConfig, ConflictPolicy};
/// use http::StatusCode;
///
/// let router = Router::builder()
///     .config(RouterConfig {
///         conflicts: ConflictPolicy::FirstWins,
///         ..Default::default()
///     })
///     .not_found(|_req, w| {
///         w.write_status(StatusCode::NOT_FOUND);
///         w.write("nothing here");
///     })
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct RouterBuilder {
    config: RouterConfig,
    fallbacks: Fallbacks,
}

impl RouterBuilder {
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Handler for paths that match no route. Defaults to a bare 404.
    pub fn not_found<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.fallbacks.not_found = handler_fn(handler);
        self
    }

    /// Handler for matched paths without a handler for the request method.
    /// Defaults to a bare 405.
    ///
    /// The request carries an [`AllowedMethods`] extension when this runs.
    pub fn method_not_allowed<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.fallbacks.method_not_allowed = handler_fn(handler);
        self
    }

    pub fn build(self) -> Router {
        Router {
            tree: RouteTree::new(Arc::new(self.fallbacks), &self.config),
            config: self.config,
        }
    }
}

/// HTTP request router over a segment tree.
///
/// Path syntax: segments separated by `/`; `:name` captures one non-empty
/// segment; `*name` (or a bare `*`) captures the rest of the path. Static
/// segments are always tried before a parameter, and a parameter before a
/// catch-all, regardless of registration order.
///
/// ```rust
/// use forge_router::{Request, ResponseWriter, Router};
/// use http::{Method, StatusCode, Uri};
///
/// # fn main() -> forge_router::Result<()> {
/// let mut router = Router::new();
/// router.get("/users/:id", |req, w| {
///     let id = req.param("id").unwrap_or_default().to_string();
///     w.write(id);
/// })?;
///
/// let mut req = Request::new(Method::GET, Uri::from_static("/users/42"));
/// let mut w = ResponseWriter::new();
/// router.dispatch(&mut req, &mut w);
/// assert_eq!(w.body(), b"42");
///
/// let mut req = Request::new(Method::POST, Uri::from_static("/users/42"));
/// let mut w = ResponseWriter::new();
/// router.dispatch(&mut req, &mut w);
/// assert_eq!(w.status(), StatusCode::METHOD_NOT_ALLOWED);
/// # Ok(())
/// # }
/// ```
pub struct Router {
    tree: RouteTree,
    config: RouterConfig,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.routes().len())
            .finish_non_exhaustive()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// A router with default configuration and bare 404/405 fallbacks.
    pub fn new() -> Self {
        RouterBuilder::default().build()
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// A router using the `[router]` section of a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self::builder().config(config.router.clone()).build()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    fn root(&mut self) -> RouteGroup<'_> {
        RouteGroup::new(&mut self.tree, RouteTree::ROOT)
    }

    /// Registers `handler` for `method` on `path`.
    ///
    /// Registering the same method and path again replaces the handler.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidPath`](crate::ErrorKind::InvalidPath) for a malformed
    /// path, [`ErrorKind::RouteConflict`](crate::ErrorKind::RouteConflict) when
    /// a wildcard segment clashes with a sibling under the reject policy.
    pub fn route<F>(&mut self, method: Method, path: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(&mut Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        self.root().route(method, path, handler)?;
        Ok(self)
    }

    method_shortcuts! {
        get => Get, "GET";
        head => Head, "HEAD";
        post => Post, "POST";
        put => Put, "PUT";
        patch => Patch, "PATCH";
        delete => Delete, "DELETE";
        options => Options, "OPTIONS";
        any => Any, "method-independent";
    }

    /// Returns a handle scoped to `prefix`; routes registered through it live
    /// at `prefix + path`.
    pub fn group(&mut self, prefix: &str) -> Result<RouteGroup<'_>> {
        RouteGroup::new(&mut self.tree, RouteTree::ROOT).into_group(prefix)
    }

    /// Attaches a middleware to every route of the router.
    pub fn use_middleware<M>(&mut self, middleware: M) -> &mut Self
    where
        M: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        self.root().use_middleware(middleware);
        self
    }

    /// Attaches several middlewares, the first one outermost.
    pub fn use_middlewares<I>(&mut self, middlewares: I) -> &mut Self
    where
        I: IntoIterator<Item = Middleware>,
    {
        self.root().use_middlewares(middlewares);
        self
    }

    /// Routes a request to its composed handler or a fallback.
    ///
    /// Path parameters of the matched route are added to `req.params_mut()`.
    /// Handlers are invoked synchronously on the calling thread.
    pub fn dispatch(&self, req: &mut Request, w: &mut ResponseWriter) {
        let mut params = PathParams::new();
        match self.tree.find(req.path(), &mut params) {
            Some(node) => {
                req.params_mut().extend(params);
                (self.tree.composed(node))(req, w);
            }
            None => {
                tracing::trace!(method = %req.method(), path = req.path(), "no route matched");
                (self.tree.fallbacks().not_found)(req, w);
            }
        }
    }

    /// Classifies `method` and `path` without invoking anything.
    pub fn lookup(&self, method: &http::Method, path: &str) -> RouteLookup {
        let mut params = PathParams::new();
        let Some(node) = self.tree.find(path, &mut params) else {
            return RouteLookup::NotFound;
        };

        let handlers = self.tree.handlers(node);
        match handlers.resolve(method) {
            Resolution::Handler(_) => RouteLookup::Match(RouteMatch {
                route: self.tree.path_of(node),
                params,
            }),
            Resolution::NotFound => RouteLookup::NotFound,
            Resolution::MethodNotAllowed => RouteLookup::MethodNotAllowed {
                allowed: handlers.allowed(),
            },
        }
    }

    /// Every registered (method, path) pair, breadth-first from the root.
    pub fn routes(&self) -> Vec<RouteDescriptor> {
        self.tree.routes()
    }

    /// Emits one `info` event per registered route.
    pub fn log_routes(&self) {
        for route in self.routes() {
            tracing::info!(method = %route.method, path = %route.path, "route");
        }
    }

    /// Freezes the router into a cloneable `tower::Service`.
    pub fn into_service(self) -> RouterService {
        RouterService::new(self)
    }
}

#[cfg(test)]
mod tests;
