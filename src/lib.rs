//! microserve - minimal HTTP/1.1 server core
//!
//! Parses raw requests off a socket, dispatches them to exact-match routes
//! or a closed static asset namespace, and writes back one response per
//! connection.

pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod server;
