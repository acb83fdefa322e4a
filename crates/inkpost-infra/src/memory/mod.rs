//! In-memory store - used when no database is configured, and in tests.
//!
//! Both repositories share one [`InMemoryStore`] so that relations behave like
//! the relational schema: drafts connect to existing users by email and
//! deleting a user cascades to their posts.

mod post_repo;
mod store;
mod user_repo;

pub use post_repo::InMemoryPostRepository;
pub use store::InMemoryStore;
pub use user_repo::InMemoryUserRepository;
