//! Test helpers shared by the router unit tests.
//!
//! Dispatch tests drive [`Router::dispatch`] directly with a [`ResponseWriter`];
//! service tests go through `oneshot()` on the tower adapter.
//!
//! ## Available Helpers
//!
//! - Request helpers: `request()`, `dispatch()`
//! - Handler helpers: `reply()`, `echo_param()`
//! - Response helpers: `body_string()`

use crate::{Request, ResponseWriter, Router};
use http::{Method, Uri};

#[cfg(test)]
pub(crate) mod introspection;
#[cfg(test)]
pub(crate) mod middleware;

// ============================================================================
// Request Helpers
// ============================================================================

/// Creates a bodiless request for `method` and `path`.
pub(crate) fn request(method: Method, path: &str) -> Request {
    let uri: Uri = path.parse().expect("Failed to parse test URI");
    Request::new(method, uri)
}

/// Dispatches a request and returns the written response.
pub(crate) fn dispatch(router: &Router, method: Method, path: &str) -> ResponseWriter {
    let mut req = request(method, path);
    let mut w = ResponseWriter::new();
    router.dispatch(&mut req, &mut w);
    w
}

// ============================================================================
// Handler Helpers
// ============================================================================

/// Handler writing a fixed body.
pub(crate) fn reply(
    body: &'static str,
) -> impl Fn(&mut Request, &mut ResponseWriter) + Send + Sync + 'static {
    move |_req, w| w.write(body)
}

/// Handler writing the value bound to `name`, or `-` when unbound.
pub(crate) fn echo_param(
    name: &'static str,
) -> impl Fn(&mut Request, &mut ResponseWriter) + Send + Sync + 'static {
    move |req, w| {
        let value = req.param(name).unwrap_or("-").to_string();
        w.write(value);
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

pub(crate) fn body_string(w: &ResponseWriter) -> String {
    String::from_utf8_lossy(w.body()).into_owned()
}
