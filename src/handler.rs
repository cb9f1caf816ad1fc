//! Handler and middleware function types.
//!
//! A [`Handler`] is a synchronous function over a request and a response
//! sink. A [`Middleware`] turns the next handler into a wrapping handler; its
//! code before the call to `next` runs on the way in, code after it runs on
//! the way out.
//!
//! ```rust
//! use forge_router::{Handler, Middleware, handler_fn, middleware_fn};
//!
//! let stamp: Middleware = middleware_fn(|next: Handler| {
//!     handler_fn(move |req, w| {
//!         w.headers_mut().insert("x-served-by", "forge".parse().unwrap());
//!         next(req, w);
//!     })
//! });
//! ```

use {
    crate::{Request, ResponseWriter},
    http::StatusCode,
    std::sync::Arc,
};

/// A request handler.
pub type Handler = Arc<dyn Fn(&mut Request, &mut ResponseWriter) + Send + Sync>;

/// A function from the next handler to the handler wrapping it.
pub type Middleware = Arc<dyn Fn(Handler) -> Handler + Send + Sync>;

/// Wraps a closure into a [`Handler`].
pub fn handler_fn<F>(f: F) -> Handler
where
    F: Fn(&mut Request, &mut ResponseWriter) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a closure into a [`Middleware`].
pub fn middleware_fn<F>(f: F) -> Middleware
where
    F: Fn(Handler) -> Handler + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Handler that writes nothing but `status`.
pub(crate) fn status_handler(status: StatusCode) -> Handler {
    handler_fn(move |_req, w| w.write_status(status))
}

/// The not-found and method-not-allowed handlers shared by every node.
///
/// Owned once by the router and handed to nodes as a shared, read-only handle.
#[derive(Clone)]
pub(crate) struct Fallbacks {
    pub(crate) not_found: Handler,
    pub(crate) method_not_allowed: Handler,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            not_found: status_handler(StatusCode::NOT_FOUND),
            method_not_allowed: status_handler(StatusCode::METHOD_NOT_ALLOWED),
        }
    }
}

impl std::fmt::Debug for Fallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fallbacks").finish_non_exhaustive()
    }
}
