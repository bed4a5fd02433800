//! # CoBudget Shared Library
//!
//! Types, storage and business logic shared by the CoBudget API server and
//! its integration clients.
//!
//! ## Module Organization
//!
//! - `auth`: caller identity resolved from request headers
//! - `catalog`: product catalog repository and built-in seed data
//! - `db`: connection pool and migrations
//! - `models`: database models and queries
//! - `recommend`: keyword scoring and occasion/diet suggestions

pub mod auth;
pub mod catalog;
pub mod db;
pub mod models;
pub mod recommend;

/// Current version of the CoBudget shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
