//! Middleware and Groups Example
//!
//! Demonstrates route groups, layered middleware and custom fallbacks.
//!
//! Run with:
//! ```bash
//! RUST_ENV=dev cargo run --example with_middleware
//! ```
//!
//! Then test:
//! ```bash
//! # Public route, timed by the root middleware
//! curl -v http://localhost:3000/api/status
//!
//! # Admin routes require a token
//! curl -v http://localhost:3000/api/admin/users/7
//! curl -v -H "Authorization: Bearer secret" http://localhost:3000/api/admin/users/7
//!
//! # JSON fallbacks with an Allow header on 405
//! curl -v http://localhost:3000/nowhere
//! curl -v -X PUT http://localhost:3000/api/status
//! ```

use forge_router::{
    AllowedMethods, Config, ConflictPolicy, Handler, LogFormat, Request, ResponseWriter, Result,
    Router, handler_fn,
};
use http::{
    HeaderValue, StatusCode,
    header::{ALLOW, AUTHORIZATION, CONTENT_TYPE},
};
use serde_json::json;
use std::time::Instant;
use tokio::net::TcpListener;

fn write_json(w: &mut ResponseWriter, status: StatusCode, value: serde_json::Value) {
    w.write_status(status);
    w.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    w.write(value.to_string());
}

/// Logs every request with its status and latency.
fn timing(next: Handler) -> Handler {
    handler_fn(move |req, w| {
        let started = Instant::now();
        next(req, w);
        tracing::info!(
            method = %req.method(),
            path = req.path(),
            status = w.status().as_u16(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "request handled"
        );
    })
}

/// Rejects requests without the demo bearer token.
fn require_token(next: Handler) -> Handler {
    handler_fn(move |req, w| {
        let authorized = req
            .headers()
            .get(AUTHORIZATION)
            .is_some_and(|value| value == "Bearer secret");
        if authorized {
            next(req, w);
        } else {
            write_json(w, StatusCode::UNAUTHORIZED, json!({ "error": "unauthorized" }));
        }
    })
}

fn not_found(req: &mut Request, w: &mut ResponseWriter) {
    write_json(
        w,
        StatusCode::NOT_FOUND,
        json!({ "error": "not found", "path": req.path() }),
    );
}

fn method_not_allowed(req: &mut Request, w: &mut ResponseWriter) {
    if let Some(allowed) = req.extensions().get::<AllowedMethods>()
        && let Ok(value) = HeaderValue::from_str(&allowed.header_value())
    {
        w.headers_mut().insert(ALLOW, value);
    }
    write_json(
        w,
        StatusCode::METHOD_NOT_ALLOWED,
        json!({ "error": "method not allowed" }),
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::default()
        .with_conflict_policy(ConflictPolicy::Reject)
        .with_log_format(LogFormat::Compact);
    config.setup_tracing();

    let mut router = Router::builder()
        .config(config.router.clone())
        .not_found(not_found)
        .method_not_allowed(method_not_allowed)
        .build();

    router.use_middleware(timing);

    let mut api = router.group("/api")?;
    api.get("/status", |_req, w| {
        write_json(w, StatusCode::OK, json!({ "status": "ok" }));
    })?;

    let mut admin = api.group("/admin")?;
    admin.use_middleware(require_token);
    admin
        .get("/users/:id", |req, w| {
            let id = req.param("id").unwrap_or_default().to_string();
            write_json(w, StatusCode::OK, json!({ "id": id, "role": "admin" }));
        })?
        .delete("/users/:id", |_req, w| w.write_status(StatusCode::NO_CONTENT))?;

    router.log_routes();
    println!("Starting server on http://127.0.0.1:3000");

    let app = axum::Router::new().fallback_service(router.into_service());
    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    axum::serve(listener, app).await?;
    Ok(())
}
