//! Demo application routes
//!
//! Ordinary consumers of the registration API: a greeting service backed by
//! the user registry, two math constants and a pair of greeting endpoints.

use serde_json::json;

use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::server::state::ServerState;

/// Registers every demo route on `state`.
pub fn register_routes(state: &mut ServerState) {
    let users = state.users();
    state.register_get("/app/hello", move |req, _| {
        let Some(name) = req.query_param("name").filter(|n| !n.is_empty()) else {
            return Response::json(
                StatusCode::BadRequest,
                &json!({ "message": "Parámetro inválido en la petición." }),
            );
        };

        let message = if users.contains_name(name) {
            format!("Hola {name}")
        } else {
            "No estás registrado en el sistema.".to_string()
        };
        Response::json(StatusCode::Ok, &json!({ "message": message }))
    });

    let users = state.users();
    state.register_post("/app/hello", move |req, _| {
        if !req.has_body() {
            return Response::error(StatusCode::BadRequest, "Cuerpo de la petición requerido");
        }
        if !accepts_as_json(req) {
            return Response::error(
                StatusCode::BadRequest,
                "Content-Type debe ser application/json",
            );
        }

        match req.json_value("name").filter(|n| !n.is_empty()) {
            Some(name) => {
                let id = users.add_user(name.as_str());
                tracing::info!(id, name = %name, "User registered");
                Response::json(
                    StatusCode::Ok,
                    &json!({ "message": format!("Hola {name} fuiste registrado exitosamente!") }),
                )
            }
            None => Response::error(
                StatusCode::BadRequest,
                "Nombre de usuario requerido en el campo 'name'",
            ),
        }
    });

    state.register_get("/pi", |_, res| constant(res, std::f64::consts::PI));
    state.register_get("/e", |_, res| constant(res, std::f64::consts::E));

    state.register_get("/greeting", |_, res| plain(res, "Hola Mundo!".to_string()));
    state.register_get("/hello", |req, res| {
        let name = req.query_param("name").unwrap_or_default();
        plain(res, format!("Hola, {name}!"))
    });
}

/// A declared JSON content type is required only when one is declared at
/// all; a bare body is accepted if it parses.
fn accepts_as_json(req: &Request) -> bool {
    req.header("content-type").is_none() || req.is_json()
}

fn constant(res: Response, value: f64) -> Response {
    plain(res, value.to_string())
}

fn plain(mut res: Response, body: String) -> Response {
    res.content_type = "text/plain".to_string();
    res.body = body.into();
    res
}
