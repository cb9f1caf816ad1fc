//! Hello World Example
//!
//! The simplest possible forge-router application, served through axum.
//!
//! Run with:
//! ```bash
//! RUST_ENV=dev cargo run --example hello_world
//! ```
//!
//! Then test:
//! ```bash
//! curl http://localhost:3000/
//! curl http://localhost:3000/hello/ferris
//! curl -X POST http://localhost:3000/     # 405
//! curl http://localhost:3000/missing      # 404
//! ```

use forge_router::{Config, Result, Router};
use http::header::CONTENT_TYPE;
use serde::Serialize;
use tokio::net::TcpListener;

#[derive(Serialize)]
struct Message {
    message: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from inline string
    // In production, use Config::default() to load from config/{RUST_ENV}.toml
    let config: Config = r#"
[router]
trailing_slash = "ignore"

[logging]
format = "default"
"#
    .parse()?;

    // Setup logging based on config
    config.setup_tracing();

    let mut router = Router::from_config(&config);
    router
        .get("/", |_req, w| w.write("Hello, World!\n"))?
        .get("/hello/:name", |req, w| {
            let message = Message {
                message: format!("Hello, {}!", req.param("name").unwrap_or("stranger")),
            };
            w.headers_mut()
                .insert(CONTENT_TYPE, "application/json".parse().unwrap());
            w.write(serde_json::to_vec(&message).unwrap_or_default());
        })?;
    router.log_routes();

    println!("Starting server on http://127.0.0.1:3000");

    let app = axum::Router::new().fallback_service(router.into_service());
    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    axum::serve(listener, app).await?;
    Ok(())
}
