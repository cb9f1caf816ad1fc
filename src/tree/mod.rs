//! Segment tree behind the router.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Each node
//! owns one path segment, the handlers registered for its full path and the
//! middleware attached at its level. Children are kept in match priority
//! order (static, then parameter, then catch-all) so lookup is a single
//! first-match walk without backtracking.
//!
//! Every node caches its composed handler: the method-resolving final handler
//! wrapped by the middleware of the node and all of its ancestors, root
//! outermost. A handler registration recomposes its node; a middleware
//! attachment recomposes the node and its whole subtree.

mod node;

pub(crate) use node::{NodeId, Resolution};

use {
    crate::{
        ConflictPolicy, Error, Method, Middleware, PathParams, Result, RouteDescriptor,
        RouterConfig, TrailingSlash,
        handler::{Fallbacks, Handler},
    },
    node::{MethodHandlers, RouteNode, SegmentKind},
    std::{collections::VecDeque, sync::Arc},
};

pub(crate) struct RouteTree {
    nodes: Vec<RouteNode>,
    fallbacks: Arc<Fallbacks>,
    conflicts: ConflictPolicy,
    trailing_slash: TrailingSlash,
}

impl RouteTree {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(fallbacks: Arc<Fallbacks>, config: &RouterConfig) -> Self {
        let root = RouteNode::new("", None, fallbacks.not_found.clone());
        let mut tree = Self {
            nodes: vec![root],
            fallbacks,
            conflicts: config.conflicts,
            trailing_slash: config.trailing_slash,
        };
        tree.recompose(Self::ROOT);
        tree
    }

    /// Returns the node for `path` below `from`, creating missing nodes.
    ///
    /// The path is expected to be validated already. A catch-all segment ends
    /// the walk; anything after it is ignored.
    pub(crate) fn get_or_create(&mut self, from: NodeId, path: &str) -> Result<NodeId> {
        let mut node = from;
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        while let Some(segment) = segments.next() {
            node = match self.child_with_segment(node, segment) {
                Some(child) => child,
                None => self.add_child(node, segment)?,
            };

            if self.nodes[node.0].kind == SegmentKind::CatchAll {
                if segments.next().is_some() {
                    tracing::warn!(
                        path,
                        catch_all = segment,
                        "segments after a catch-all are ignored"
                    );
                }
                break;
            }
        }

        Ok(node)
    }

    fn child_with_segment(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].segment == segment)
    }

    fn add_child(&mut self, parent: NodeId, segment: &str) -> Result<NodeId> {
        let kind = SegmentKind::of(segment);

        if kind != SegmentKind::Static && self.conflicts == ConflictPolicy::Reject {
            let sibling = self.nodes[parent.0]
                .children
                .iter()
                .map(|child| &self.nodes[child.0])
                .find(|child| child.kind != SegmentKind::Static);

            if let Some(sibling) = sibling {
                return Err(Error::route_conflict(format!(
                    "segment '{}' conflicts with '{}' under '{}'",
                    segment,
                    sibling.segment,
                    self.path_of(parent)
                )));
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(RouteNode::new(
            segment,
            Some(parent),
            self.fallbacks.not_found.clone(),
        ));

        let position = self.nodes[parent.0]
            .children
            .partition_point(|child| self.nodes[child.0].kind <= kind);
        self.nodes[parent.0].children.insert(position, id);

        self.recompose(id);
        Ok(id)
    }

    /// Matches a request path, binding wildcard values into `params`.
    ///
    /// Returns the node the walk ends on whether or not it has handlers;
    /// `params` is only written when a node is found.
    pub(crate) fn find(&self, path: &str, params: &mut PathParams) -> Option<NodeId> {
        if path.is_empty() || path == "/" {
            return Some(Self::ROOT);
        }

        let mut rest = path.strip_prefix('/').unwrap_or(path);
        let mut node = Self::ROOT;
        let mut bound: Vec<(&str, &str)> = Vec::new();

        while !rest.is_empty() {
            let (segment, tail) = rest.split_once('/').unwrap_or((rest, ""));
            let mut next = None;

            for &child in &self.nodes[node.0].children {
                let candidate = &self.nodes[child.0];
                match candidate.kind {
                    SegmentKind::Static if candidate.segment == segment => {
                        next = Some(child);
                        break;
                    }
                    SegmentKind::Param if !segment.is_empty() => {
                        bound.push((candidate.param_name(), segment));
                        next = Some(child);
                        break;
                    }
                    SegmentKind::CatchAll => {
                        bound.push((candidate.param_name(), rest));
                        params.extend(bound);
                        return Some(child);
                    }
                    _ => {}
                }
            }

            node = next?;
            rest = tail;
        }

        if self.trailing_slash == TrailingSlash::Strict && path.len() > 1 && path.ends_with('/') {
            return None;
        }

        params.extend(bound);
        Some(node)
    }

    pub(crate) fn set_handler(&mut self, id: NodeId, method: Method, handler: Handler) {
        self.nodes[id.0].handlers.set(method, handler);
        self.recompose(id);
    }

    pub(crate) fn add_middlewares(&mut self, id: NodeId, middlewares: Vec<Middleware>) {
        self.nodes[id.0].middlewares.extend(middlewares);
        self.recompose_subtree(id);
    }

    pub(crate) fn composed(&self, id: NodeId) -> &Handler {
        &self.nodes[id.0].composed
    }

    pub(crate) fn handlers(&self, id: NodeId) -> &MethodHandlers {
        &self.nodes[id.0].handlers
    }

    pub(crate) fn fallbacks(&self) -> &Fallbacks {
        &self.fallbacks
    }

    /// Middleware of `id` and its ancestors applied innermost first, so the
    /// root's first middleware ends up outermost.
    fn compose(&self, id: NodeId) -> Handler {
        let mut handler = self.nodes[id.0]
            .handlers
            .final_handler(self.fallbacks.clone());

        let mut current = Some(id);
        while let Some(n) = current {
            let node = &self.nodes[n.0];
            for middleware in node.middlewares.iter().rev() {
                handler = middleware(handler);
            }
            current = node.parent;
        }

        handler
    }

    fn recompose(&mut self, id: NodeId) {
        let composed = self.compose(id);
        self.nodes[id.0].composed = composed;
    }

    fn recompose_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            self.recompose(n);
            stack.extend(self.nodes[n.0].children.iter().copied());
        }
    }

    /// Full registration path of a node, `/` for the root.
    pub(crate) fn path_of(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(n) = current {
            let node = &self.nodes[n.0];
            if node.parent.is_some() {
                segments.push(node.segment.as_str());
            }
            current = node.parent;
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    /// One descriptor per registered (node, method), breadth-first.
    pub(crate) fn routes(&self) -> Vec<RouteDescriptor> {
        let mut routes = Vec::new();
        let mut queue = VecDeque::from([Self::ROOT]);

        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id.0];
            if !node.handlers.is_empty() {
                let path = self.path_of(id);
                routes.extend(
                    node.handlers
                        .registered()
                        .map(|method| RouteDescriptor::new(method, path.clone())),
                );
            }
            queue.extend(node.children.iter().copied());
        }

        routes
    }

    #[cfg(test)]
    fn child_segments(&self, id: NodeId) -> Vec<&str> {
        self.nodes[id.0]
            .children
            .iter()
            .map(|child| self.nodes[child.0].segment.as_str())
            .collect()
    }
}
