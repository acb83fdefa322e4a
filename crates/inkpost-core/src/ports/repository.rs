use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, User, UserUpdate};
use crate::error::RepoResult;
use crate::feed::FeedQuery;

/// User store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> RepoResult<User>;

    async fn find_all(&self) -> RepoResult<Vec<User>>;

    /// Find a user by id. Unknown ids are `Ok(None)`.
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<User>>;

    /// Fails with `NotFound` when the user does not exist.
    async fn update(&self, id: i32, update: UserUpdate) -> RepoResult<User>;

    /// Delete a user and return the removed record.
    async fn delete(&self, id: i32) -> RepoResult<User>;
}

/// Post store.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Post>>;

    async fn find_by_author(&self, author_id: i32) -> RepoResult<Vec<Post>>;

    /// Run an assembled feed query.
    async fn feed(&self, query: FeedQuery) -> RepoResult<Vec<Post>>;

    /// Create a draft connected to the user owning `author_email`.
    ///
    /// Fails with `NotFound` when no such user exists.
    async fn create_draft(&self, post: NewPost, author_email: &str) -> RepoResult<Post>;

    /// Add one to the view counter in a single store-side update.
    async fn increment_view_count(&self, id: i32) -> RepoResult<Post>;

    /// Flip `published` in a single store-side update.
    async fn toggle_published(&self, id: i32) -> RepoResult<Post>;

    async fn delete(&self, id: i32) -> RepoResult<Post>;
}
