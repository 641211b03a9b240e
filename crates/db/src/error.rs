//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A keyed lookup, update or delete matched zero rows.
    #[error("{0}")]
    NotFound(String),

    /// The request can never succeed as given (empty update, duplicate key,
    /// dangling foreign key).
    #[error("{0}")]
    BadRequest(String),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
