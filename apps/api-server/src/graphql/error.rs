//! Store errors surfaced as GraphQL errors.

use async_graphql::{Error, ErrorExtensions};

use inkpost_core::RepoError;

/// Propagate a store error, keeping its message and tagging a `code`
/// extension.
pub fn repo_error(err: RepoError) -> Error {
    let code = match &err {
        RepoError::NotFound { .. } => "NOT_FOUND",
        RepoError::Constraint(_) => "CONFLICT",
        RepoError::Connection(msg) => {
            tracing::error!("Database connection error: {}", msg);
            "INTERNAL"
        }
        RepoError::Query(msg) => {
            tracing::error!("Database query error: {}", msg);
            "INTERNAL"
        }
    };

    Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}
