//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
///
/// Resolvers propagate these unchanged; only the transport layer decides how
/// they are rendered.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl RepoError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// Result alias used by every repository port.
pub type RepoResult<T> = Result<T, RepoError>;
