//! # ecos
//!
//! A small HTTP echo server. Four routes, no state:
//!
//! | Method | Path | Behavior |
//! |---|---|---|
//! | GET | `/` | Greeting built from the `NAME` environment variable |
//! | GET | `/search` | Echoes the `term` and `category` query parameters |
//! | GET | `/users/{id}` | Echoes the `id` path parameter |
//! | POST | `/data` | Echoes the parsed JSON (or url-encoded) request body |
//!
//! ## What ecos does not do
//!
//! No persistence, no authentication, no input validation beyond
//! defaulting. HTTP parsing, connection handling, and keep-alive belong to
//! hyper; route matching belongs to [`matchit`]. What is left — and all
//! that lives in this crate — is wiring:
//!
//! - Radix-tree routing over hyper — O(path-length) lookup via [`matchit`]
//! - Body parsing ahead of the routes — JSON and extended url-encoded forms
//! - Graceful shutdown — SIGTERM / Ctrl-C, drains in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ecos::{Config, Server, routes};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Arc::new(Config::from_env());
//!     let app = routes::app(&config);
//!
//!     Server::bind(&format!("0.0.0.0:{}", config.port))
//!         .serve(app)
//!         .await
//!         .expect("server error");
//! }
//! ```

mod config;
mod error;
mod handler;
mod middleware;
mod request;
mod response;
mod router;
mod server;

pub mod routes;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
