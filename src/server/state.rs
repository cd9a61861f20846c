//! Process-wide server state
//!
//! Built mutably during startup, then wrapped in an `Arc` and handed to the
//! accept loop. From that point the route table and static root are only
//! reachable through `&ServerState`, so they cannot change while serving.

use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::router::Router;
use crate::routing::static_files::{AssetStore, StaticFiles};
use crate::server::users::UserRegistry;

#[derive(Debug, Default)]
pub struct ServerState {
    pub router: Router,
    pub static_files: StaticFiles,
    users: Arc<UserRegistry>,
}

impl ServerState {
    pub fn new(assets: AssetStore) -> Self {
        Self {
            router: Router::new(),
            static_files: StaticFiles::new(assets),
            users: Arc::new(UserRegistry::new()),
        }
    }

    pub fn register_get<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request, Response) -> Response + Send + Sync + 'static,
    {
        self.router.get(path, handler);
    }

    pub fn register_post<F>(&mut self, path: &str, handler: F)
    where
        F: Fn(&Request, Response) -> Response + Send + Sync + 'static,
    {
        self.router.post(path, handler);
    }

    pub fn set_static_root(&mut self, dir: &str) {
        self.static_files.set_root(dir);
    }

    /// Shared handle to the user registry, for handlers to capture.
    pub fn users(&self) -> Arc<UserRegistry> {
        Arc::clone(&self.users)
    }

    pub fn add_user(&self, name: impl Into<String>) -> u64 {
        self.users.add_user(name)
    }

    pub fn list_users(&self) -> Vec<(u64, String)> {
        self.users.list_users()
    }
}
