//! # TaskTrack Shared Library
//!
//! Shared types and business logic used by the TaskTrack API server:
//! the data models and their store operations, the authentication and
//! authorization primitives, the reporting aggregates, and the database
//! layer.
//!
//! ## Module Organization
//!
//! - `models`: database models and CRUD/lifecycle operations
//! - `auth`: password hashing, tokens, the authorization policy, and the
//!   actor context
//! - `reports`: read-only summary aggregates
//! - `db`: connection pool, migrations, and bootstrap seed

pub mod auth;
pub mod db;
pub mod models;
pub mod reports;

/// Current version of the TaskTrack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
