//! Repository functions — one function per resource operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! Keyed operations that match no row return [`DbError::NotFound`].
//!
//! [`DbError::NotFound`]: crate::DbError::NotFound

pub mod companies;
pub mod jobs;
