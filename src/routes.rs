//! The four routes: greeting, query echo, path echo, body echo.
//!
//! Every handler is a pure function from request to response — no backing
//! store, no shared state. The greeting captures its name from [`Config`]
//! at router construction and never touches the environment afterwards.

use std::sync::Arc;

use crate::config::Config;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Builds the application router.
pub fn app(config: &Arc<Config>) -> Router {
    let config = Arc::clone(config);
    Router::new()
        .get("/", move |req: Request| hola(req, Arc::clone(&config)))
        .get("/search", search)
        .get("/users/{id}", user)
        .post("/data", data)
}

// GET /
async fn hola(_req: Request, config: Arc<Config>) -> Response {
    Response::text(format!("Hola {}!, ejemplo de JS!!!", config.name))
}

// GET /search
//
// Query values land in the fragment verbatim, unescaped — deliberate
// parity with the behavior this server mirrors (see DESIGN.md).
async fn search(req: Request) -> Response {
    let term = non_empty(req.query("term")).unwrap_or("empty");
    let category = non_empty(req.query("category")).unwrap_or("all");

    Response::html(format!(
        "\n      <h4> Respuesta </h4>\n      <p> Término:  {term}</p>\n      <p> Categoria: {category} </p>\n    "
    ))
}

// GET /users/{id}
async fn user(req: Request) -> Response {
    let id = req.param("id").unwrap_or_default();
    Response::text(format!("Enviando información del usuario con id =  {id}"))
}

// POST /data
//
// The body was parsed (or rejected) before this runs. No attached body —
// wrong or missing content type — echoes as an empty object.
async fn data(req: Request) -> Response {
    let body = match req.json() {
        Some(value) => value.to_string(),
        None => "{}".to_owned(),
    };
    Response::text(format!("Datos JSON recibidos: {body}"))
}

/// `Option` that also treats an empty string as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, Method};
    use serde_json::json;

    fn config(name: &str) -> Arc<Config> {
        Arc::new(Config {
            name: name.to_owned(),
            port: 3000,
        })
    }

    fn get(path: &str, raw_query: Option<&str>) -> Request {
        Request::new(
            Method::GET,
            path.to_owned(),
            raw_query,
            HeaderMap::new(),
            Bytes::new(),
        )
    }

    fn body_str(response: Response) -> String {
        String::from_utf8(response.body().to_vec()).unwrap()
    }

    #[tokio::test]
    async fn greets_with_configured_name() {
        let response = hola(get("/", None), config("Rustaceans")).await;
        assert_eq!(body_str(response), "Hola Rustaceans!, ejemplo de JS!!!");
    }

    #[tokio::test]
    async fn greets_world_by_default() {
        let response = hola(get("/", None), config("World")).await;
        assert!(body_str(response).contains("World"));
    }

    #[tokio::test]
    async fn search_defaults_when_params_absent() {
        let body = body_str(search(get("/search", None)).await);
        assert!(body.contains("empty"));
        assert!(body.contains("all"));
    }

    #[tokio::test]
    async fn search_echoes_both_params_verbatim() {
        let body = body_str(
            search(get("/search", Some("term=shoes&category=clothing"))).await,
        );
        assert!(body.contains("shoes"));
        assert!(body.contains("clothing"));
    }

    #[tokio::test]
    async fn search_treats_empty_value_as_absent() {
        let body = body_str(search(get("/search", Some("term="))).await);
        assert!(body.contains("empty"));
    }

    #[tokio::test]
    async fn user_echoes_path_id() {
        let mut request = get("/users/42", None);
        request.set_params([("id".to_owned(), "42".to_owned())].into());
        let body = body_str(user(request).await);
        assert!(body.contains("42"));
    }

    #[tokio::test]
    async fn data_echoes_parsed_body() {
        let mut request = Request::new(
            Method::POST,
            "/data".to_owned(),
            None,
            HeaderMap::new(),
            Bytes::new(),
        );
        request.set_json(json!({"a": 1}));
        let body = body_str(data(request).await);
        assert_eq!(body, r#"Datos JSON recibidos: {"a":1}"#);
    }

    #[tokio::test]
    async fn data_without_parsed_body_echoes_empty_object() {
        let request = Request::new(
            Method::POST,
            "/data".to_owned(),
            None,
            HeaderMap::new(),
            Bytes::new(),
        );
        let body = body_str(data(request).await);
        assert_eq!(body, "Datos JSON recibidos: {}");
    }

    #[tokio::test]
    async fn app_registers_all_four_routes() {
        let app = app(&config("World"));
        let request = get("/users/7", None);
        let response = crate::server::route(&app, request).await;
        assert!(body_str(response).contains('7'));
    }
}
