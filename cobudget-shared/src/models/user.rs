/// User model and database operations
///
/// Users are never registered explicitly. The first request that carries an
/// external auth id creates the row; later requests refresh `last_login_at`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     external_uid VARCHAR(128) NOT NULL UNIQUE,
///     email VARCHAR(120) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_login_at TIMESTAMPTZ
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use cobudget_shared::models::user::{UpsertUser, User};
/// use cobudget_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::upsert(
///     &pool,
///     UpsertUser {
///         external_uid: "firebase-uid-123".to_string(),
///         email: "asha@example.com".to_string(),
///     },
/// )
/// .await?;
/// println!("Signed in as {}", user.email);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A shopper known to the system
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Internal user ID
    pub id: Uuid,

    /// ID issued by the external auth provider
    pub external_uid: String,

    /// Email address reported by the auth provider
    pub email: String,

    /// When the user was first seen
    pub created_at: DateTime<Utc>,

    /// Most recent authenticated request
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Identity fields used to find or create a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUser {
    pub external_uid: String,
    pub email: String,
}

impl User {
    /// Finds the user for an external id, creating it on first sight
    ///
    /// The stored email follows whatever the auth provider reports now.
    ///
    /// # Errors
    ///
    /// Returns a database error if the email already belongs to a different
    /// external id (unique constraint) or the connection fails.
    pub async fn upsert(pool: &PgPool, data: UpsertUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (external_uid, email, last_login_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (external_uid)
            DO UPDATE SET email = EXCLUDED.email, last_login_at = NOW()
            RETURNING id, external_uid, email, created_at, last_login_at
            "#,
        )
        .bind(data.external_uid)
        .bind(data.email)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by internal ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, external_uid, email, created_at, last_login_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by the auth provider's ID
    pub async fn find_by_external_uid(
        pool: &PgPool,
        external_uid: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, external_uid, email, created_at, last_login_at
            FROM users
            WHERE external_uid = $1
            "#,
        )
        .bind(external_uid)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user along with their budgets and personal cart
    ///
    /// Returns true if a row was removed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_user_roundtrips_through_json() {
        let input: UpsertUser = serde_json::from_str(
            r#"{"external_uid": "uid-1", "email": "a@example.com"}"#,
        )
        .unwrap();

        assert_eq!(input.external_uid, "uid-1");
        assert_eq!(input.email, "a@example.com");
    }
}
