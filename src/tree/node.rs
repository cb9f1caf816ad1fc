use {
    crate::{
        AllowedMethods, Method,
        handler::{Fallbacks, Handler, handler_fn},
    },
    std::sync::Arc,
};

/// Index of a node inside the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// What a node's segment matches. The declaration order is the match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SegmentKind {
    Static,
    Param,
    CatchAll,
}

impl SegmentKind {
    pub(crate) fn of(segment: &str) -> Self {
        match segment.as_bytes().first() {
            Some(b':') => SegmentKind::Param,
            Some(b'*') => SegmentKind::CatchAll,
            _ => SegmentKind::Static,
        }
    }
}

pub(crate) struct RouteNode {
    pub(crate) segment: String,
    pub(crate) kind: SegmentKind,
    pub(crate) parent: Option<NodeId>,
    /// Sorted by `kind`, insertion order within a kind.
    pub(crate) children: Vec<NodeId>,
    pub(crate) handlers: MethodHandlers,
    pub(crate) middlewares: Vec<crate::Middleware>,
    pub(crate) composed: Handler,
}

impl RouteNode {
    pub(crate) fn new(segment: &str, parent: Option<NodeId>, composed: Handler) -> Self {
        Self {
            segment: segment.to_string(),
            kind: SegmentKind::of(segment),
            parent,
            children: Vec::new(),
            handlers: MethodHandlers::default(),
            middlewares: Vec::new(),
            composed,
        }
    }

    /// Key under which a wildcard segment binds its value.
    pub(crate) fn param_name(&self) -> &str {
        match self.kind {
            SegmentKind::CatchAll if self.segment.len() == 1 => "*",
            SegmentKind::Param | SegmentKind::CatchAll => &self.segment[1..],
            SegmentKind::Static => &self.segment,
        }
    }
}

/// Outcome of resolving a request method against a node's handlers.
pub(crate) enum Resolution<'a> {
    Handler(&'a Handler),
    /// The node never had a handler registered.
    NotFound,
    /// The node has handlers, none for this method.
    MethodNotAllowed,
}

/// Fixed-size handler table indexed by [`Method`].
#[derive(Clone, Default)]
pub(crate) struct MethodHandlers {
    slots: [Option<Handler>; Method::COUNT],
}

impl MethodHandlers {
    pub(crate) fn set(&mut self, method: Method, handler: Handler) {
        self.slots[method.index()] = Some(handler);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Registered tags in table order.
    pub(crate) fn registered(&self) -> impl Iterator<Item = Method> + '_ {
        Method::ALL
            .into_iter()
            .filter(|m| self.slots[m.index()].is_some())
    }

    /// The `Any` handler wins over an exact method match.
    pub(crate) fn resolve(&self, method: &http::Method) -> Resolution<'_> {
        if let Some(handler) = &self.slots[Method::Any.index()] {
            return Resolution::Handler(handler);
        }
        if let Some(handler) = Method::from_http(method).and_then(|m| self.slots[m.index()].as_ref())
        {
            return Resolution::Handler(handler);
        }
        if self.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::MethodNotAllowed
        }
    }

    pub(crate) fn allowed(&self) -> AllowedMethods {
        AllowedMethods::new(self.registered().collect())
    }

    /// Innermost handler of a node: method resolution over a snapshot of the table.
    pub(crate) fn final_handler(&self, fallbacks: Arc<Fallbacks>) -> Handler {
        let table = self.clone();
        handler_fn(move |req, w| match table.resolve(req.method()) {
            Resolution::Handler(handler) => handler(req, w),
            Resolution::NotFound => {
                tracing::trace!(path = req.path(), "matched node has no handlers");
                (fallbacks.not_found)(req, w)
            }
            Resolution::MethodNotAllowed => {
                tracing::trace!(method = %req.method(), path = req.path(), "method not allowed");
                req.extensions_mut().insert(table.allowed());
                (fallbacks.method_not_allowed)(req, w)
            }
        })
    }
}
