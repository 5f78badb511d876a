//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method};

/// An incoming HTTP request, as a route handler sees it.
///
/// Built once per request in the dispatch path: hyper parses the wire
/// format, the body is collected up front, and the body-parsing step may
/// attach a decoded JSON value before the handler runs.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
    query: HashMap<String, String>,
    params: HashMap<String, String>,
    parsed_body: Option<serde_json::Value>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        raw_query: Option<&str>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        let query = raw_query.map(parse_query).unwrap_or_default();
        Self {
            method,
            path,
            headers,
            body,
            query,
            params: HashMap::new(),
            parsed_body: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes, already collected from the connection.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a query parameter. Duplicate keys are last-write-wins.
    ///
    /// For `/search?term=shoes`, `req.query("term")` returns `Some("shoes")`.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns
    /// `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The body as parsed by the body-parsing step, if it ran and matched
    /// the content type.
    pub fn json(&self) -> Option<&serde_json::Value> {
        self.parsed_body.as_ref()
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub(crate) fn set_json(&mut self, value: serde_json::Value) {
        self.parsed_body = Some(value);
    }
}

/// Percent-decodes `key=value` pairs into a flat map, last write winning.
fn parse_query(raw: &str) -> HashMap<String, String> {
    form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(raw_query: Option<&str>) -> Request {
        Request::new(
            Method::GET,
            "/search".to_owned(),
            raw_query,
            HeaderMap::new(),
            Bytes::new(),
        )
    }

    #[test]
    fn parses_query_pairs() {
        let req = request(Some("term=shoes&category=clothing"));
        assert_eq!(req.query("term"), Some("shoes"));
        assert_eq!(req.query("category"), Some("clothing"));
        assert_eq!(req.query("missing"), None);
    }

    #[test]
    fn duplicate_query_keys_are_last_write_wins() {
        let req = request(Some("term=first&term=second"));
        assert_eq!(req.query("term"), Some("second"));
    }

    #[test]
    fn percent_decodes_values() {
        let req = request(Some("term=caf%C3%A9+con+leche"));
        assert_eq!(req.query("term"), Some("café con leche"));
    }

    #[test]
    fn no_query_string_is_empty() {
        let req = request(None);
        assert_eq!(req.query("term"), None);
    }
}
