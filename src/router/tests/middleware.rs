//! Middleware composition order and recomposition.

use super::{body_string, dispatch, reply};
use crate::{Handler, Middleware, Router, handler_fn, middleware_fn};
use http::{HeaderValue, Method, StatusCode};
use std::sync::{Arc, Mutex};

type Trace = Arc<Mutex<Vec<String>>>;

/// Middleware recording `name` before and after calling the next handler.
fn recording(trace: &Trace, name: &'static str) -> Middleware {
    let trace = trace.clone();
    middleware_fn(move |next: Handler| {
        let trace = trace.clone();
        handler_fn(move |req, w| {
            trace.lock().unwrap().push(format!("{name}:in"));
            next(req, w);
            trace.lock().unwrap().push(format!("{name}:out"));
        })
    })
}

/// Middleware setting a response header.
fn header(name: &'static str, value: &'static str) -> Middleware {
    middleware_fn(move |next: Handler| {
        handler_fn(move |req, w| {
            w.headers_mut()
                .insert(name, HeaderValue::from_static(value));
            next(req, w);
        })
    })
}

fn take(trace: &Trace) -> Vec<String> {
    std::mem::take(&mut *trace.lock().unwrap())
}

#[test]
fn test_group_middleware_wraps_nested_routes() {
    let mut router = Router::new();
    let mut api = router.group("/api").unwrap();
    api.use_middlewares([header("x-api", "yes")]);
    api.get("/direct", reply("direct")).unwrap();
    let mut v1 = api.group("/v1").unwrap();
    v1.use_middlewares([header("x-v1", "yes")]);
    v1.get("/nested", reply("nested")).unwrap();
    router.get("/outside", reply("outside")).unwrap();

    let w = dispatch(&router, Method::GET, "/api/direct");
    assert_eq!(w.headers()["x-api"], "yes");
    assert!(w.headers().get("x-v1").is_none());

    let w = dispatch(&router, Method::GET, "/api/v1/nested");
    assert_eq!(w.headers()["x-api"], "yes");
    assert_eq!(w.headers()["x-v1"], "yes");
    assert_eq!(body_string(&w), "nested");

    let w = dispatch(&router, Method::GET, "/outside");
    assert!(w.headers().get("x-api").is_none());
}

#[test]
fn test_parent_runs_before_child() {
    let trace = Trace::default();
    let mut router = Router::new();
    router.use_middlewares([recording(&trace, "root")]);
    let mut api = router.group("/api").unwrap();
    api.use_middlewares([recording(&trace, "api")]);
    let mut users = api.group("/users").unwrap();
    users.use_middlewares([recording(&trace, "users")]);
    let handler_trace = trace.clone();
    users
        .get("/:id", move |_req, _w| {
            handler_trace.lock().unwrap().push("handler".to_string());
        })
        .unwrap();

    dispatch(&router, Method::GET, "/api/users/1");
    assert_eq!(
        take(&trace),
        vec![
            "root:in", "api:in", "users:in", "handler", "users:out", "api:out", "root:out"
        ]
    );
}

#[test]
fn test_first_middleware_of_a_call_is_outermost() {
    let trace = Trace::default();
    let mut router = Router::new();
    router.use_middlewares([recording(&trace, "a"), recording(&trace, "b")]);
    router.use_middlewares([recording(&trace, "c")]);
    router.get("/", reply("root")).unwrap();

    dispatch(&router, Method::GET, "/");
    assert_eq!(
        take(&trace),
        vec!["a:in", "b:in", "c:in", "c:out", "b:out", "a:out"]
    );
}

#[test]
fn test_middleware_added_after_routes_still_applies() {
    let mut router = Router::new();
    router.get("/api/users", reply("users")).unwrap();
    let mut api = router.group("/api").unwrap();
    api.get("/posts", reply("posts")).unwrap();

    api.use_middleware(|next| {
        handler_fn(move |req, w| {
            w.headers_mut()
                .insert("x-late", HeaderValue::from_static("1"));
            next(req, w);
        })
    });

    for path in ["/api/users", "/api/posts"] {
        let w = dispatch(&router, Method::GET, path);
        assert_eq!(w.headers()["x-late"], "1", "path {path}");
    }
}

#[test]
fn test_middleware_can_short_circuit() {
    let mut router = Router::new();
    router.use_middleware(|next| {
        handler_fn(move |req, w| {
            if req.headers().contains_key("authorization") {
                next(req, w);
            } else {
                w.write_status(StatusCode::UNAUTHORIZED);
            }
        })
    });
    router.get("/secret", reply("secret")).unwrap();

    let w = dispatch(&router, Method::GET, "/secret");
    assert_eq!(w.status(), StatusCode::UNAUTHORIZED);
    assert!(w.body().is_empty());
}

#[test]
fn test_method_not_allowed_passes_through_node_middleware() {
    let mut router = Router::new();
    let mut api = router.group("/api").unwrap();
    api.use_middlewares([header("x-api", "yes")]);
    api.get("/users", reply("users")).unwrap();

    let w = dispatch(&router, Method::PUT, "/api/users");
    assert_eq!(w.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(w.headers()["x-api"], "yes");

    // No node at all: the not-found handler runs without middleware.
    let w = dispatch(&router, Method::GET, "/api/nothing/here");
    assert_eq!(w.status(), StatusCode::NOT_FOUND);
    assert!(w.headers().get("x-api").is_none());
}

#[test]
fn test_handler_replacement_keeps_middleware() {
    let mut router = Router::new();
    router.use_middlewares([header("x-root", "1")]);
    router.get("/page", reply("old")).unwrap();
    router.get("/page", reply("new")).unwrap();

    let w = dispatch(&router, Method::GET, "/page");
    assert_eq!(body_string(&w), "new");
    assert_eq!(w.headers()["x-root"], "1");
}

#[test]
fn test_empty_middleware_list_is_a_no_op() {
    let mut router = Router::new();
    router.use_middlewares(Vec::new());
    router.get("/", reply("root")).unwrap();
    assert_eq!(body_string(&dispatch(&router, Method::GET, "/")), "root");
}
