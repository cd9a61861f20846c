//! Exact-match route table
//!
//! Two independent tables, one per method, keyed by the literal path. There
//! are no wildcards or path variables: `/users` and `/users/` are different
//! routes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::http::request::{Method, Request, split_target};
use crate::http::response::Response;

/// A route handler: receives the request and a default response to build on.
pub type Handler = Arc<dyn Fn(&Request, Response) -> Response + Send + Sync>;

#[derive(Default, Clone)]
pub struct Router {
    get: HashMap<String, Handler>,
    post: HashMap<String, Handler>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut get: Vec<_> = self.get.keys().collect();
        let mut post: Vec<_> = self.post.keys().collect();
        get.sort();
        post.sort();
        f.debug_struct("Router")
            .field("get", &get)
            .field("post", &post)
            .finish()
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method` at `path`, replacing any previous
    /// handler for the same pair. A `?query` suffix on `path` is ignored.
    pub fn register<F>(&mut self, method: Method, path: &str, handler: F)
    where
        F: Fn(&Request, Response) -> Response + Send + Sync + 'static,
    {
        let (path, _) = split_target(path);
        let replaced = self
            .table_mut(method)
            .insert(path.to_string(), Arc::new(handler))
            .is_some();

        if replaced {
            tracing::debug!(method = method.as_str(), path, "Route handler replaced");
        } else {
            tracing::debug!(method = method.as_str(), path, "Route registered");
        }
    }

    pub fn get<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request, Response) -> Response + Send + Sync + 'static,
    {
        self.register(Method::GET, path, handler);
    }

    pub fn post<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request, Response) -> Response + Send + Sync + 'static,
    {
        self.register(Method::POST, path, handler);
    }

    /// Looks up the handler for an exact path. `path` must already have its
    /// query component removed.
    pub fn resolve(&self, method: Method, path: &str) -> Option<&Handler> {
        self.table(method).get(path)
    }

    fn table(&self, method: Method) -> &HashMap<String, Handler> {
        match method {
            Method::GET => &self.get,
            Method::POST => &self.post,
        }
    }

    fn table_mut(&mut self, method: Method) -> &mut HashMap<String, Handler> {
        match method {
            Method::GET => &mut self.get,
            Method::POST => &mut self.post,
        }
    }
}
