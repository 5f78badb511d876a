//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] and return it. Everything in this server
//! is UTF-8 text, HTML, or JSON — there are no binary responses.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::Full;

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK)
///
/// ```rust
/// use ecos::Response;
/// use http::StatusCode;
///
/// Response::text("hola");
/// Response::html("<p>hola</p>");
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::status(StatusCode::NOT_FOUND);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use ecos::Response;
/// use http::StatusCode;
///
/// Response::builder()
///     .status(StatusCode::BAD_REQUEST)
///     .text("invalid JSON body");
/// ```
#[derive(Debug)]
pub struct Response {
    body: Bytes,
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl Response {
    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_content_type("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// `200 OK` — `text/html; charset=utf-8`.
    pub fn html(body: impl Into<String>) -> Self {
        Self::with_content_type("text/html; charset=utf-8", body.into().into_bytes())
    }

    /// `200 OK` — `application/json`. Pass bytes from your serializer
    /// directly: `serde_json::to_vec(&val)` or `format!(…).into_bytes()`.
    pub fn json(body: Vec<u8>) -> Self {
        Self::with_content_type("application/json", body)
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self {
            body: Bytes::new(),
            headers: Vec::new(),
            status: code,
        }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder {
            headers: Vec::new(),
            status: StatusCode::OK,
        }
    }

    fn with_content_type(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body: body.into(),
            headers: vec![("content-type".to_owned(), content_type.to_owned())],
            status: StatusCode::OK,
        }
    }

    /// The status this response will be sent with.
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// The response body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Converts into the hyper response the connection writes out.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        if let Some(map) = builder.headers_mut() {
            for (name, value) in &self.headers {
                // Header names and values are set by this crate only; a
                // malformed pair is a bug, not a request-time condition.
                let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
                    continue;
                };
                let Ok(value) = HeaderValue::from_str(value) else {
                    continue;
                };
                map.insert(name, value);
            }
        }
        builder
            .body(Full::new(self.body))
            .expect("status and headers are pre-validated")
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Terminated by
/// a typed body method.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// Terminate with an HTML body (`text/html; charset=utf-8`).
    pub fn html(self, body: impl Into<String>) -> Response {
        self.finish("text/html; charset=utf-8", body.into().into_bytes())
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish("application/json", body)
    }

    /// Terminate with no body.
    pub fn no_body(self) -> Response {
        Response {
            body: Bytes::new(),
            headers: self.headers,
            status: self.status,
        }
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response {
            body: body.into(),
            headers,
            status: self.status,
        }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Lets handlers return `Response`, a string, or a bare status code.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sets_plain_content_type() {
        let response = Response::text("hola").into_inner();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn html_sets_html_content_type() {
        let response = Response::html("<p>hola</p>").into_inner();
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn builder_overrides_status() {
        let response = Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .text("nope");
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.body(), b"nope");
    }

    #[test]
    fn status_only_has_empty_body() {
        let response = Response::status(StatusCode::NOT_FOUND);
        assert!(response.body().is_empty());
    }
}
