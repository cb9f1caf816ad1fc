//! Route listing, lookup and registration logging.

use super::reply;
use crate::{Method, RouteLookup, Router};
use tracing_test::traced_test;

fn sample_router() -> Router {
    let mut router = Router::new();
    router
        .get("/users/:id/posts", reply("posts"))
        .unwrap()
        .post("/users", reply("create"))
        .unwrap()
        .get("/users", reply("list"))
        .unwrap()
        .get("/users/:id", reply("show"))
        .unwrap()
        .delete("/users/:id", reply("delete"))
        .unwrap()
        .get("/health", reply("ok"))
        .unwrap()
        .get("/static/*path", reply("file"))
        .unwrap();
    router
}

#[test]
fn test_routes_are_listed_breadth_first() {
    let router = sample_router();
    let routes: Vec<String> = router.routes().iter().map(ToString::to_string).collect();

    assert_eq!(
        routes,
        vec![
            "GET /users",
            "POST /users",
            "GET /health",
            "GET /users/:id",
            "DELETE /users/:id",
            "GET /static/*path",
            "GET /users/:id/posts",
        ]
    );
}

#[test]
fn test_routes_serialize_to_json() {
    let mut router = Router::new();
    router.any("/", reply("root")).unwrap();

    let json = serde_json::to_value(router.routes()).unwrap();
    assert_eq!(json, serde_json::json!([{ "method": "ANY", "path": "/" }]));
}

#[test]
fn test_lookup_match_reports_route_and_params() {
    let router = sample_router();

    match router.lookup(&http::Method::GET, "/users/42/posts") {
        RouteLookup::Match(m) => {
            assert_eq!(m.route, "/users/:id/posts");
            assert_eq!(m.get_param("id"), Some("42"));
        }
        other => panic!("expected a match, got {other:?}"),
    }

    match router.lookup(&http::Method::GET, "/static/css/app.css") {
        RouteLookup::Match(m) => assert_eq!(m.get_param("path"), Some("css/app.css")),
        other => panic!("expected a match, got {other:?}"),
    }
}

#[test]
fn test_lookup_method_not_allowed_lists_methods() {
    let router = sample_router();

    match router.lookup(&http::Method::PATCH, "/users/1") {
        RouteLookup::MethodNotAllowed { allowed } => {
            assert_eq!(allowed.methods(), &[Method::Get, Method::Delete]);
            assert_eq!(allowed.header_value(), "GET, DELETE");
        }
        other => panic!("expected method not allowed, got {other:?}"),
    }
}

#[test]
fn test_lookup_not_found() {
    let router = sample_router();
    assert!(matches!(
        router.lookup(&http::Method::GET, "/nope"),
        RouteLookup::NotFound
    ));
    // Node exists only as a path ancestor.
    assert!(matches!(
        router.lookup(&http::Method::GET, "/static"),
        RouteLookup::NotFound
    ));
    assert!(matches!(
        router.lookup(&http::Method::GET, "/"),
        RouteLookup::NotFound
    ));
}

#[test]
#[traced_test]
fn test_registration_is_logged() {
    let mut router = Router::new();
    router.get("/users/:id", reply("show")).unwrap();
    let mut api = router.group("/api").unwrap();
    api.use_middleware(|next| next);

    assert!(logs_contain("route registered"));
    assert!(logs_contain("/users/:id"));
    assert!(logs_contain("route group created"));
    assert!(logs_contain("middleware attached"));
}

#[test]
#[traced_test]
fn test_log_routes_emits_each_route() {
    let router = sample_router();
    router.log_routes();

    assert!(logs_contain("/users/:id/posts"));
    assert!(logs_contain("DELETE"));
}

#[test]
#[traced_test]
fn test_ignored_segments_after_catch_all_warn() {
    let mut router = Router::new();
    router.get("/files/*rest/ignored", reply("file")).unwrap();

    assert!(logs_contain("segments after a catch-all are ignored"));
    let routes: Vec<String> = router.routes().iter().map(ToString::to_string).collect();
    assert_eq!(routes, vec!["GET /files/*rest"]);
}
