//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. You
//! register a path, you get a handler. That is all.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};

/// The application router.
///
/// Build it once at startup and pass it to
/// [`Server::serve`](crate::Server::serve). Each registration returns
/// `self` so routes chain naturally. Path parameters use `{name}` syntax
/// and are retrieved with [`Request::param`](crate::Request::param).
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register a handler for `GET path`.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// Register a handler for `POST path`.
    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    /// Register a handler for an arbitrary method + path pair.
    ///
    /// # Panics
    ///
    /// Panics on an invalid or conflicting route pattern — registration
    /// happens once at startup and a bad pattern is programmer error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::response::Response;

    async fn ok(_req: Request) -> Response {
        Response::text("ok")
    }

    #[test]
    fn matches_registered_route() {
        let router = Router::new().get("/", ok);
        assert!(router.lookup(&Method::GET, "/").is_some());
    }

    #[test]
    fn extracts_path_params() {
        let router = Router::new().get("/users/{id}", ok);
        let (_, params) = router.lookup(&Method::GET, "/users/42").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn unknown_path_is_none() {
        let router = Router::new().get("/", ok);
        assert!(router.lookup(&Method::GET, "/missing").is_none());
    }

    #[test]
    fn method_mismatch_is_none() {
        let router = Router::new().post("/data", ok);
        assert!(router.lookup(&Method::GET, "/data").is_none());
    }
}
