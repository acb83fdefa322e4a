use async_trait::async_trait;
use chrono::Utc;

use inkpost_core::RepoError;
use inkpost_core::domain::{NewUser, User, UserUpdate};
use inkpost_core::error::RepoResult;
use inkpost_core::ports::UserRepository;

use super::InMemoryStore;

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn duplicate_email(email: &str) -> RepoError {
    RepoError::Constraint(format!("unique constraint violated: users.email = {email}"))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> RepoResult<User> {
        let mut tables = self.store.tables.write().await;

        if tables.user_by_email(&new_user.email).is_some() {
            return Err(duplicate_email(&new_user.email));
        }

        let now = Utc::now();
        let user = User {
            id: tables.next_user_id(),
            name: new_user.name,
            email: new_user.email,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());

        tracing::debug!(user_id = user.id, "User registered in memory");
        Ok(user)
    }

    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<Option<User>> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn update(&self, id: i32, update: UserUpdate) -> RepoResult<User> {
        let mut tables = self.store.tables.write().await;

        if tables
            .user_by_email(&update.email)
            .is_some_and(|other| other.id != id)
        {
            return Err(duplicate_email(&update.email));
        }

        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("User", format!("id={id}")))?;
        user.apply(update);

        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> RepoResult<User> {
        let mut tables = self.store.tables.write().await;

        let user = tables
            .users
            .remove(&id)
            .ok_or_else(|| RepoError::not_found("User", format!("id={id}")))?;

        // posts.author_id is ON DELETE CASCADE
        tables.posts.retain(|_, p| p.author_id != id);

        Ok(user)
    }
}
