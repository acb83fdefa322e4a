//! # Inkpost Core
//!
//! The domain layer of the Inkpost GraphQL service.
//! This crate contains the entities, the repository ports and the feed
//! query assembler, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod feed;
pub mod ports;

pub use error::RepoError;
pub use feed::{FeedArgs, FeedQuery, PostFilter, PostOrderBy, SortOrder};
