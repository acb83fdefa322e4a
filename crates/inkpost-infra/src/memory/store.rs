use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use inkpost_core::domain::{Post, User};

use super::{InMemoryPostRepository, InMemoryUserRepository};

/// Rows keyed by id; ids are assigned from monotonically increasing counters.
#[derive(Default)]
pub(crate) struct Tables {
    pub users: BTreeMap<i32, User>,
    pub posts: BTreeMap<i32, Post>,
    last_user_id: i32,
    last_post_id: i32,
}

impl Tables {
    pub fn next_user_id(&mut self) -> i32 {
        self.last_user_id += 1;
        self.last_user_id
    }

    pub fn next_post_id(&mut self) -> i32 {
        self.last_post_id += 1;
        self.last_post_id
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }
}

/// Shared in-memory tables behind an async `RwLock`.
///
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub(crate) tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository::new(self.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository::new(self.clone())
    }
}
