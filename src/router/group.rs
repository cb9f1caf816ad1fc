use {
    super::{method_shortcuts, validate_path},
    crate::{
        Error, Handler, Method, Middleware, Request, ResponseWriter, Result,
        handler::{handler_fn, middleware_fn},
        tree::{NodeId, RouteTree},
    },
};

/// Registration handle scoped to a path prefix.
///
/// A group borrows the router mutably, so groups are a registration-time
/// tool only. Middleware attached to a group wraps every route below its
/// prefix, including routes of nested groups and routes registered before
/// the middleware was attached.
///
/// ```rust
/// use forge_router::{Router, handler_fn};
///
/// # fn main() -> forge_router::Result<()> {
/// let mut router = Router::new();
/// let mut api = router.group("/api")?;
/// api.use_middleware(|next| {
///     handler_fn(move |req, w| {
///         w.headers_mut().insert("x-api", "1".parse().unwrap());
///         next(req, w);
///     })
/// });
/// api.get("/users", |_req, w| w.write("[]"))?;
///
/// let mut v2 = api.group("/v2")?;
/// v2.get("/users", |_req, w| w.write("[]"))?;
///
/// assert_eq!(router.routes().len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct RouteGroup<'a> {
    tree: &'a mut RouteTree,
    node: NodeId,
}

impl std::fmt::Debug for RouteGroup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGroup")
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}

impl<'a> RouteGroup<'a> {
    pub(crate) fn new(tree: &'a mut RouteTree, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// Registration path of the group's prefix node.
    pub fn path(&self) -> String {
        self.tree.path_of(self.node)
    }

    /// Registers `handler` for `method` on `path`, relative to the prefix.
    ///
    /// `"/"` registers on the prefix node itself.
    pub fn route<F>(&mut self, method: Method, path: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(&mut Request, &mut ResponseWriter) + Send + Sync + 'static,
    {
        validate_path(path)?;
        let node = self.tree.get_or_create(self.node, path)?;
        self.tree.set_handler(node, method, handler_fn(handler));

        tracing::debug!(
            method = %method,
            path = %self.tree.path_of(node),
            "route registered"
        );
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

    /// Nested group at `prefix` below this one.
    pub fn group(&mut self, prefix: &str) -> Result<RouteGroup<'_>> {
        let node = self.prefix_node(prefix)?;
        Ok(RouteGroup {
            tree: &mut *self.tree,
            node,
        })
    }

    /// Like [`group`](Self::group), handing over this handle's borrow.
    pub(crate) fn into_group(mut self, prefix: &str) -> Result<RouteGroup<'a>> {
        let node = self.prefix_node(prefix)?;
        Ok(RouteGroup {
            tree: self.tree,
            node,
        })
    }

    fn prefix_node(&mut self, prefix: &str) -> Result<NodeId> {
        validate_path(prefix)?;
        if prefix.split('/').any(|segment| segment.starts_with('*')) {
            return Err(Error::invalid_path(format!(
                "group prefix must not contain a catch-all: '{prefix}'"
            )));
        }

        let node = self.tree.get_or_create(self.node, prefix)?;
        tracing::debug!(prefix = %self.tree.path_of(node), "route group created");
        Ok(node)
    }

    /// Attaches a middleware to every route below this group.
    pub fn use_middleware<M>(&mut self, middleware: M) -> &mut Self
    where
        M: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        self.use_middlewares([middleware_fn(middleware)])
    }

    /// Attaches several middlewares, the first one outermost.
    pub fn use_middlewares<I>(&mut self, middlewares: I) -> &mut Self
    where
        I: IntoIterator<Item = Middleware>,
    {
        let middlewares: Vec<Middleware> = middlewares.into_iter().collect();
        if middlewares.is_empty() {
            return self;
        }

        tracing::debug!(
            prefix = %self.tree.path_of(self.node),
            count = middlewares.len(),
            "middleware attached"
        );
        self.tree.add_middlewares(self.node, middlewares);
        self
    }
}
