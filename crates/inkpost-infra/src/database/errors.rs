use sea_orm::{DbErr, SqlErr};

use inkpost_core::RepoError;

/// Classify a SeaORM error.
pub(crate) fn db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            return RepoError::Constraint(format!("unique constraint violated: {msg}"));
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            return RepoError::Constraint(format!("foreign key violated: {msg}"));
        }
        _ => {}
    }

    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

/// Mask an email for logging, keeping the first character and the domain.
pub(crate) fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***{domain}"),
            _ => format!("***{domain}"),
        }
    } else {
        "***".to_string()
    }
}
