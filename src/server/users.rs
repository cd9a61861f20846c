//! In-memory user registry
//!
//! Lives only as long as the process. Ids are handed out sequentially from 1.

use parking_lot::Mutex;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    users: BTreeMap<u64, String>,
}

#[derive(Debug, Default)]
pub struct UserRegistry {
    inner: Mutex<Registry>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` under a fresh id and returns that id. Names are not
    /// required to be unique.
    pub fn add_user(&self, name: impl Into<String>) -> u64 {
        let mut registry = self.inner.lock();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.users.insert(id, name.into());
        id
    }

    /// All users, ordered by id.
    pub fn list_users(&self) -> Vec<(u64, String)> {
        self.inner
            .lock()
            .users
            .iter()
            .map(|(id, name)| (*id, name.clone()))
            .collect()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.inner.lock().users.values().any(|n| n == name)
    }
}
