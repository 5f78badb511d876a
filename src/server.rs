//! HTTP server, dispatch pipeline, and graceful shutdown.
//!
//! Per request, in order:
//!
//! 1. hyper parses the wire format; the body is collected up front.
//! 2. Body parsing ([`crate::middleware`]) — a malformed JSON body is
//!    rejected with `400` before route lookup, matching a middleware
//!    installed ahead of the routes.
//! 3. Route lookup — no match is `404` with an empty body.
//! 4. Handler invocation — handlers are infallible, so every request gets
//!    a response and hyper never sees an error.
//!
//! On SIGTERM or Ctrl-C the server stops accepting, lets every in-flight
//! connection run to completion, and returns from [`Server::serve`].

use std::net::SocketAddr;
use std::sync::Arc;

use http::StatusCode;
use http_body_util::BodyExt;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::middleware;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { addr }
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown: a SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;

        // Shared across connection tasks without copying the routing table.
        let router = Arc::new(router);

        info!(addr = %self.addr, "listening");

        // Tracks every spawned connection task so shutdown can wait for
        // them all.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops the accept loop
                // even when more connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection, not
                        // once per connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req).await }
                        });

                        // Serves HTTP/1.1 or HTTP/2, whichever the client
                        // negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not
                // grow without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Adapts one hyper request into a [`Request`] and routes it.
///
/// The error type is [`Infallible`](std::convert::Infallible) — all
/// failures become responses (400, 404) before hyper sees them.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<http_body_util::Full<bytes::Bytes>>, std::convert::Infallible> {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_owned();
    let raw_query = parts.uri.query().map(str::to_owned);

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            error!("body read error: {e}");
            return Ok(Response::status(StatusCode::BAD_REQUEST).into_inner());
        }
    };

    let request = Request::new(parts.method, path, raw_query.as_deref(), parts.headers, body);
    Ok(route(&router, request).await.into_inner())
}

/// Body parsing, route lookup, handler invocation.
pub(crate) async fn route(router: &Router, mut request: Request) -> Response {
    if let Err(rejection) = middleware::parse_body(&mut request) {
        return rejection;
    }

    match router.lookup(request.method(), request.path()) {
        Some((handler, params)) => {
            request.set_params(params);
            handler.call(request).await
        }
        None => not_found(),
    }
}

fn not_found() -> Response {
    Response::status(StatusCode::NOT_FOUND)
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives: SIGTERM or
/// SIGINT (Ctrl-C) on Unix, Ctrl-C only elsewhere.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // Never resolves, which disables the SIGTERM arm off Unix.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue, Method};

    async fn echo_id(req: Request) -> Response {
        let id = req.param("id").unwrap_or_default().to_owned();
        Response::text(id)
    }

    fn post_json(path: &str, body: &str) -> Request {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        Request::new(
            Method::POST,
            path.to_owned(),
            None,
            headers,
            Bytes::copy_from_slice(body.as_bytes()),
        )
    }

    #[tokio::test]
    async fn routes_to_matching_handler_with_params() {
        let router = Router::new().get("/users/{id}", echo_id);
        let request = Request::new(
            Method::GET,
            "/users/42".to_owned(),
            None,
            HeaderMap::new(),
            Bytes::new(),
        );
        let response = route(&router, request).await;
        assert_eq!(response.body(), b"42");
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let router = Router::new().get("/", |_req: Request| async { Response::text("ok") });
        let request = Request::new(
            Method::GET,
            "/missing".to_owned(),
            None,
            HeaderMap::new(),
            Bytes::new(),
        );
        let response = route(&router, request).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_body_rejects_before_route_lookup() {
        // Even an unroutable path gets the 400, never the 404: body
        // parsing sits ahead of the routes.
        let router = Router::new();
        let response = route(&router, post_json("/nowhere", "{not json")).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}
