//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, typed row structs, the SQL fragment builders
//! used for partial updates and search filters, and repository functions for
//! the `companies` and `jobs` tables.  No HTTP concerns live here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod sql;

pub use pool::DbPool;
pub use error::DbError;
