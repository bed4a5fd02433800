/// Shared cart sessions and their line items
///
/// A shared cart is addressed by an 8-character code such as `"K3D9QX2A"`
/// that the owner hands to other shoppers. Anyone holding the code can view the
/// cart; signed-in users can add lines to it while it is active.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE shared_cart_sessions (
///     id VARCHAR(8) PRIMARY KEY,
///     name VARCHAR(100) NOT NULL,
///     created_by_user_id UUID NOT NULL REFERENCES users (id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     is_active BOOLEAN NOT NULL DEFAULT TRUE
/// );
///
/// CREATE TABLE shared_cart_items (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     session_id VARCHAR(8) NOT NULL REFERENCES shared_cart_sessions (id) ON DELETE CASCADE,
///     product_id VARCHAR(50) NOT NULL REFERENCES products (id),
///     added_by_user_id UUID NOT NULL REFERENCES users (id),
///     quantity INTEGER NOT NULL DEFAULT 1,
///     added_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use cobudget_shared::models::shared_cart::{
///     CreateSharedCartItem, CreateSharedCartSession, SharedCartItem, SharedCartSession,
///     SharedCartSummary,
/// };
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let session = SharedCartSession::create(
///     &pool,
///     CreateSharedCartSession {
///         name: "Diwali groceries".to_string(),
///         created_by_user_id: owner,
///     },
/// )
/// .await?;
///
/// SharedCartItem::create(
///     &pool,
///     CreateSharedCartItem {
///         session_id: session.id.clone(),
///         product_id: "DB001".to_string(),
///         added_by_user_id: owner,
///         quantity: 1,
///     },
/// )
/// .await?;
///
/// let lines = SharedCartItem::list_lines(&pool, &session.id).await?;
/// let summary = SharedCartSummary::from_lines(lines);
/// println!("Grand total: {}", summary.grand_total);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::product::Tags;

/// Length of a share code
pub const SESSION_CODE_LEN: usize = 8;

/// How many codes [`SharedCartSession::create`] tries before giving up
pub const MAX_CODE_ATTEMPTS: usize = 16;

/// Name used when the creator does not supply one
pub const DEFAULT_CART_NAME: &str = "Shared Cart";

/// Shown in summaries for lines whose contributor row is gone
pub const UNKNOWN_CONTRIBUTOR: &str = "unknown@example.com";

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draws a random share code of uppercase letters and digits
pub fn generate_session_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SESSION_CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Errors raised while creating a shared cart
#[derive(Debug, thiserror::Error)]
pub enum SharedCartError {
    /// Every generated code collided with an existing session
    #[error("no unused share code found after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A collaborative cart
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SharedCartSession {
    /// Share code
    pub id: String,

    pub name: String,

    /// User who created (and may close) the cart
    pub created_by_user_id: Uuid,

    pub created_at: DateTime<Utc>,

    /// Closed carts cannot be joined or added to
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSharedCartSession {
    pub name: String,
    pub created_by_user_id: Uuid,
}

impl SharedCartSession {
    /// Creates a session under a fresh random share code
    ///
    /// # Errors
    ///
    /// Returns [`SharedCartError::CodeSpaceExhausted`] if
    /// [`MAX_CODE_ATTEMPTS`] consecutive codes were already taken.
    pub async fn create(
        pool: &PgPool,
        data: CreateSharedCartSession,
    ) -> Result<Self, SharedCartError> {
        Self::create_with_codes(pool, data, || {
            generate_session_code(&mut rand::thread_rng())
        })
        .await
    }

    /// Creates a session, drawing candidate codes from `next_code`
    ///
    /// The insert uses `ON CONFLICT DO NOTHING`, so a concurrent request that
    /// grabs the same code makes this attempt return no row and retry.
    pub async fn create_with_codes<F>(
        pool: &PgPool,
        data: CreateSharedCartSession,
        mut next_code: F,
    ) -> Result<Self, SharedCartError>
    where
        F: FnMut() -> String,
    {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = next_code();

            let inserted = sqlx::query_as::<_, SharedCartSession>(
                r#"
                INSERT INTO shared_cart_sessions (id, name, created_by_user_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                RETURNING id, name, created_by_user_id, created_at, is_active
                "#,
            )
            .bind(&code)
            .bind(&data.name)
            .bind(data.created_by_user_id)
            .fetch_optional(pool)
            .await?;

            match inserted {
                Some(session) => {
                    info!(session_id = %session.id, attempt, "Created shared cart");
                    return Ok(session);
                }
                None => debug!(code = %code, attempt, "Share code collision, retrying"),
            }
        }

        warn!(attempts = MAX_CODE_ATTEMPTS, "Could not find an unused share code");
        Err(SharedCartError::CodeSpaceExhausted {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, SharedCartSession>(
            r#"
            SELECT id, name, created_by_user_id, created_at, is_active
            FROM shared_cart_sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Marks a session inactive
    ///
    /// Returns false if the session does not exist.
    pub async fn deactivate(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE shared_cart_sessions SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a session and, by cascade, its items
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shared_cart_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// One line in a shared cart
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SharedCartItem {
    pub id: Uuid,
    pub session_id: String,
    pub product_id: String,
    pub added_by_user_id: Uuid,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSharedCartItem {
    pub session_id: String,
    pub product_id: String,
    pub added_by_user_id: Uuid,
    pub quantity: i32,
}

/// Product fields shown next to a shared cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineProduct {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub tags: Tags,
}

/// A shared cart line with its product and contributor resolved
///
/// `product` is `None` when the catalog no longer has the product;
/// `added_by` is `None` when the contributor row is gone.
#[derive(Debug, Clone)]
pub struct SharedCartLine {
    pub item_id: Uuid,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
    pub added_by: Option<String>,
    pub product: Option<LineProduct>,
}

#[derive(sqlx::FromRow)]
struct SharedCartLineRow {
    item_id: Uuid,
    quantity: i32,
    added_at: DateTime<Utc>,
    added_by: Option<String>,
    product_id: Option<String>,
    product_name: Option<String>,
    product_price: Option<Decimal>,
    product_category: Option<String>,
    product_tags: Option<String>,
}

impl TryFrom<SharedCartLineRow> for SharedCartLine {
    type Error = sqlx::Error;

    fn try_from(row: SharedCartLineRow) -> Result<Self, Self::Error> {
        let product = match (
            row.product_id,
            row.product_name,
            row.product_price,
            row.product_category,
        ) {
            (Some(id), Some(name), Some(price), Some(category)) => {
                let tags = Tags::try_from(row.product_tags.unwrap_or_default())
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
                Some(LineProduct {
                    id,
                    name,
                    price,
                    category,
                    tags,
                })
            }
            _ => None,
        };

        Ok(SharedCartLine {
            item_id: row.item_id,
            quantity: row.quantity,
            added_at: row.added_at,
            added_by: row.added_by,
            product,
        })
    }
}

impl SharedCartItem {
    /// Appends a line to a session
    ///
    /// Adding a product that is already in the cart creates another line;
    /// quantities are not merged.
    pub async fn create(pool: &PgPool, data: CreateSharedCartItem) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, SharedCartItem>(
            r#"
            INSERT INTO shared_cart_items (session_id, product_id, added_by_user_id, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, session_id, product_id, added_by_user_id, quantity, added_at
            "#,
        )
        .bind(data.session_id)
        .bind(data.product_id)
        .bind(data.added_by_user_id)
        .bind(data.quantity)
        .fetch_one(pool)
        .await
    }

    /// Raw lines of a session, oldest first
    pub async fn list_by_session(
        pool: &PgPool,
        session_id: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, SharedCartItem>(
            r#"
            SELECT id, session_id, product_id, added_by_user_id, quantity, added_at
            FROM shared_cart_items
            WHERE session_id = $1
            ORDER BY added_at, id
            "#,
        )
        .bind(session_id)
        .fetch_all(pool)
        .await
    }

    /// Lines of a session joined with product and contributor, oldest first
    pub async fn list_lines(
        pool: &PgPool,
        session_id: &str,
    ) -> Result<Vec<SharedCartLine>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SharedCartLineRow>(
            r#"
            SELECT i.id AS item_id, i.quantity, i.added_at,
                   u.email AS added_by,
                   p.id AS product_id, p.name AS product_name, p.price AS product_price,
                   p.category AS product_category, p.tags AS product_tags
            FROM shared_cart_items i
            LEFT JOIN products p ON p.id = i.product_id
            LEFT JOIN users u ON u.id = i.added_by_user_id
            WHERE i.session_id = $1
            ORDER BY i.added_at, i.id
            "#,
        )
        .bind(session_id)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(SharedCartLine::try_from).collect()
    }
}

/// A line as presented in a cart summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedCartEntry {
    pub id: Uuid,
    pub product: LineProduct,
    pub added_by: String,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Lines plus per-contributor and overall totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedCartSummary {
    pub items: Vec<SharedCartEntry>,

    /// Contributor email -> sum of `price * quantity` over their lines
    pub user_totals: BTreeMap<String, Decimal>,

    pub grand_total: Decimal,
}

impl SharedCartSummary {
    /// Builds the summary; lines without a product are skipped
    pub fn from_lines(lines: Vec<SharedCartLine>) -> Self {
        let mut summary = SharedCartSummary::default();

        for line in lines {
            let Some(product) = line.product else {
                continue;
            };
            let added_by = line
                .added_by
                .unwrap_or_else(|| UNKNOWN_CONTRIBUTOR.to_string());

            let subtotal = product.price * Decimal::from(line.quantity);
            *summary
                .user_totals
                .entry(added_by.clone())
                .or_insert(Decimal::ZERO) += subtotal;

            summary.items.push(SharedCartEntry {
                id: line.item_id,
                product,
                added_by,
                quantity: line.quantity,
                added_at: line.added_at,
            });
        }

        summary.grand_total = summary.user_totals.values().copied().sum();
        summary
    }
}
