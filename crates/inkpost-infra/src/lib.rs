//! # Inkpost Infrastructure
//!
//! Concrete implementations of the ports defined in `inkpost-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL store via SeaORM

pub mod database;
pub mod memory;

// Re-exports - In-Memory
pub use memory::{InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};

// Re-exports - Postgres
pub use database::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresUserRepository};
