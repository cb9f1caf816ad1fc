//! # forge-router
//!
//! An embeddable HTTP request router built on a segment tree.
//!
//! Routes are registered per method on paths made of static segments, named
//! parameters (`:id`) and catch-alls (`*path`). Static segments always win
//! over parameters, and parameters over catch-alls, whatever the registration
//! order. Lookup is a single first-match walk: it never backtracks.
//!
//! A matched path without a handler for the request method is answered as
//! *method not allowed*, an unmatched path as *not found*; both fallbacks are
//! configurable. Middleware attached to the router or to a group wraps every
//! route below it, outermost first.
//!
//! # Quick Start
//!
//! ```rust
//! use forge_router::{Request, ResponseWriter, Result, Router, handler_fn};
//! use http::{Method, Uri};
//!
//! fn main() -> Result<()> {
//!     let mut router = Router::new();
//!     router.use_middleware(|next| {
//!         handler_fn(move |req, w| {
//!             w.headers_mut().insert("x-powered-by", "forge".parse().unwrap());
//!             next(req, w);
//!         })
//!     });
//!
//!     router.get("/", |_req, w| w.write("Hello, World!"))?;
//!
//!     let mut api = router.group("/api")?;
//!     api.get("/users/:id", |req, w| {
//!         let id = req.param("id").unwrap_or_default().to_string();
//!         w.write(format!("user {id}"));
//!     })?;
//!
//!     let mut req = Request::new(Method::GET, Uri::from_static("/api/users/7"));
//!     let mut w = ResponseWriter::new();
//!     router.dispatch(&mut req, &mut w);
//!     assert_eq!(w.body(), b"user 7");
//!     assert_eq!(w.headers()["x-powered-by"], "forge");
//!     Ok(())
//! }
//! ```
//!
//! # Serving
//!
//! The router does not own a server loop. [`Router::into_service`] freezes it
//! into a `tower::Service`, which any tower-compatible server can drive:
//!
//! ```rust,no_run
//! use forge_router::{Config, Router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();  // Loads from config/{RUST_ENV}.toml
//!     config.setup_tracing();
//!
//!     let mut router = Router::from_config(&config);
//!     router.get("/", |_req, w| w.write("Hello, World!"))?;
//!     router.log_routes();
//!
//!     let app = axum::Router::new().fallback_service(router.into_service());
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! Matching policies and the log format are plain data and load from TOML:
//!
//! ```rust
//! use forge_router::{Config, ConflictPolicy, TrailingSlash};
//!
//! // From string (useful for tests)
//! let config: Config = r#"
//!     [router]
//!     conflicts = "first-wins"
//!     trailing_slash = "strict"
//!
//!     [logging]
//!     format = "compact"
//! "#.parse().unwrap();
//! assert_eq!(config.router.conflicts, ConflictPolicy::FirstWins);
//!
//! // With builder methods
//! let config = config.with_trailing_slash(TrailingSlash::Ignore);
//! ```
//!
//! The not-found and method-not-allowed handlers are code and are supplied
//! through [`Router::builder`].
//!
//! # Error Handling
//!
//! The library uses a custom [`Result`] type. Registration fails fast with an
//! [`Error`] of kind [`ErrorKind::InvalidPath`] or [`ErrorKind::RouteConflict`].
//! Errors convert to structured JSON responses:
//!
//! ```json
//! {
//!   "error_code": "INVALID_REQUEST",
//!   "message": "error reading a body from connection"
//! }
//! ```
//!
//! # Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | `router` | Registration facade, dispatch and introspection ([`Router`]) |
//! | `tree` | Segment tree and middleware composition |
//! | `config` | Configuration loading and validation ([`Config`]) |
//! | `error` | Error types and handling ([`Error`]) |
mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod tree;
mod utils;

pub use config::*;
pub use error::*;
pub use handler::{Handler, Middleware, handler_fn, middleware_fn};
pub use method::Method;
pub use request::{PathParams, Request};
pub use response::ResponseWriter;
pub use router::*;
pub use utils::*;

pub type Result<T> = std::result::Result<T, Error>;
