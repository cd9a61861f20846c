//! Errors raised while serving a single connection.
//!
//! None of these escape the connection handler: each one is turned into a
//! well-formed HTTP reply by [`HttpError::to_writer`].

use thiserror::Error;

use crate::http::response::{Response, StatusCode};
use crate::http::writer::{BAD_REQUEST_FALLBACK, ResponseWriter};

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("malformed request line")]
    MalformedRequestLine,

    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("invalid Content-Length: {0}")]
    InvalidContentLength(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("no route registered")]
    RouteNotFound,

    #[error("asset not found")]
    AssetNotFound,
}

impl HttpError {
    /// The response sent for this error. `MalformedRequestLine` has no
    /// structured form; see [`HttpError::to_writer`].
    pub fn to_response(&self) -> Response {
        match self {
            HttpError::MalformedRequestLine => {
                Response::error(StatusCode::BadRequest, "Bad Request")
            }
            HttpError::UnsupportedMethod(_) => {
                Response::error(StatusCode::MethodNotAllowed, "Method Not Allowed")
            }
            HttpError::InvalidContentLength(_) => {
                Response::error(StatusCode::BadRequest, "Invalid Content-Length header")
            }
            HttpError::Io(e) => Response::error(StatusCode::ServerError, format!("Server Error: {e}")),
            HttpError::RouteNotFound => Response::error(StatusCode::NotFound, "Endpoint not found"),
            HttpError::AssetNotFound => {
                Response::error(StatusCode::NotFound, "Endpoint get not found")
            }
        }
    }

    pub fn to_writer(&self) -> ResponseWriter {
        match self {
            HttpError::MalformedRequestLine => ResponseWriter::from_bytes(BAD_REQUEST_FALLBACK),
            other => ResponseWriter::new(&other.to_response()),
        }
    }
}
