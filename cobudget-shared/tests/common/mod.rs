//! Shared setup for database integration tests
//!
//! Tests connect to the database named by `DATABASE_URL` and run the
//! migrations first. When the variable is unset the tests return early, so a
//! plain `cargo test` works without PostgreSQL.
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/cobudget_test cargo test -p cobudget-shared -- --test-threads=1
//! ```

#![allow(dead_code)]

use cobudget_shared::catalog::{CatalogRepository, PgCatalog};
use cobudget_shared::db::migrations::run_migrations;
use cobudget_shared::db::pool::{create_pool, DatabaseConfig};
use cobudget_shared::models::user::{UpsertUser, User};
use sqlx::PgPool;
use uuid::Uuid;

pub fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok().filter(|url| !url.is_empty())
}

/// Connects, migrates and seeds the catalog; `None` without `DATABASE_URL`
pub async fn test_pool() -> Option<PgPool> {
    let Some(url) = database_url() else {
        eprintln!("DATABASE_URL not set, skipping database test");
        return None;
    };

    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 5,
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");

    run_migrations(&pool).await.expect("Failed to run migrations");
    PgCatalog::new(pool.clone())
        .seed_if_empty()
        .await
        .expect("Failed to seed catalog");

    Some(pool)
}

/// Creates a user with a unique external ID
pub async fn create_test_user(pool: &PgPool) -> User {
    let uid = Uuid::new_v4();
    User::upsert(
        pool,
        UpsertUser {
            external_uid: format!("test-{}", uid),
            email: format!("test-{}@example.com", uid),
        },
    )
    .await
    .expect("Failed to create user")
}
