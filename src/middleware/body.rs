//! JSON and url-encoded body parsing.
//!
//! Two content types are recognized, matched on the media-type essence
//! (parameters such as `; charset=utf-8` are ignored):
//!
//! - `application/json` — parsed with serde_json. An empty body decodes to
//!   an empty object, not an error; a malformed body rejects the request
//!   with `400 Bad Request` before any route runs.
//! - `application/x-www-form-urlencoded` — pairs decoded with
//!   [`form_urlencoded`], then bracketed keys (`a[b][c]=v`) expanded into
//!   nested objects ("extended" mode). Percent-decoding is lossy on
//!   invalid UTF-8, so form bodies never reject.
//!
//! Any other (or missing) content type leaves the request without a
//! parsed body.

use http::StatusCode;
use serde_json::{Map, Value};

use crate::request::Request;
use crate::response::Response;

/// Parses the request body according to its content type, attaching the
/// result to `req`. Returns the `400` response to send instead of routing
/// when the body is malformed.
pub(crate) fn parse_body(req: &mut Request) -> Result<(), Response> {
    let Some(content_type) = req.header("content-type") else {
        return Ok(());
    };
    let essence = content_type.split(';').next().unwrap_or("").trim();

    if essence.eq_ignore_ascii_case("application/json") {
        let value = parse_json(req.body()).map_err(reject)?;
        req.set_json(value);
    } else if essence.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        let value = parse_form(req.body());
        req.set_json(value);
    }
    Ok(())
}

fn reject(reason: String) -> Response {
    Response::builder().status(StatusCode::BAD_REQUEST).text(reason)
}

/// An empty body is an empty object — the parser default callers rely on.
fn parse_json(body: &[u8]) -> Result<Value, String> {
    if body.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| format!("invalid JSON body: {e}"))
}

/// Decodes `key=value` pairs and expands bracket paths into nested
/// objects: `a[b]=1&a[c]=2` becomes `{"a":{"b":"1","c":"2"}}`.
fn parse_form(body: &[u8]) -> Value {
    let mut root = Map::new();
    for (key, value) in form_urlencoded::parse(body) {
        let segments = split_key(&key);
        insert_path(&mut root, &segments, value.into_owned());
    }
    Value::Object(root)
}

/// Splits `a[b][c]` into `["a", "b", "c"]`. An unbalanced bracket keeps
/// the raw remainder as a single segment.
fn split_key(key: &str) -> Vec<&str> {
    let Some(open) = key.find('[') else {
        return vec![key];
    };
    let (head, mut rest) = key.split_at(open);
    let mut segments = vec![head];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            segments.push(stripped);
            return segments;
        };
        segments.push(&stripped[..close]);
        rest = &stripped[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(rest);
    }
    segments
}

/// Writes `value` at the bracket path, creating intermediate objects.
/// Duplicate leaf keys are last-write-wins; a deeper write replaces a
/// scalar already stored at an intermediate key.
fn insert_path(map: &mut Map<String, Value>, segments: &[&str], value: String) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.insert((*head).to_owned(), Value::String(value));
        return;
    }
    let entry = map
        .entry((*head).to_owned())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert_path(child, rest, value);
    }
}
