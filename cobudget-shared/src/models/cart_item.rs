/// Personal cart lines
///
/// Each user has one cart. Unlike shared carts, adding a product that is
/// already in the personal cart bumps the existing line's quantity
/// (`unique_user_cart_product`).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE cart_items (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     product_id VARCHAR(50) NOT NULL REFERENCES products (id),
///     quantity INTEGER NOT NULL DEFAULT 1,
///     added_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT unique_user_cart_product UNIQUE (user_id, product_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::product::Product;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: String,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// A cart line joined with its product
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartLine {
    pub item_id: Uuid,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub product: Product,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Sum of `price * quantity` over all lines
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::subtotal).sum()
}

impl CartItem {
    /// Adds a product to the user's cart, merging with an existing line
    pub async fn add(
        pool: &PgPool,
        user_id: Uuid,
        product_id: &str,
        quantity: i32,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT unique_user_cart_product
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            RETURNING id, user_id, product_id, quantity, added_at
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(pool)
        .await
    }

    /// Removes a line if it belongs to `user_id`
    ///
    /// Returns false when nothing matched.
    pub async fn remove(pool: &PgPool, user_id: Uuid, item_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the user's cart, oldest line first
    pub async fn list_lines(pool: &PgPool, user_id: Uuid) -> Result<Vec<CartLine>, sqlx::Error> {
        sqlx::query_as::<_, CartLine>(
            r#"
            SELECT ci.id AS item_id, ci.quantity, ci.added_at,
                   p.id, p.name, p.price, p.category, p.tags, p.description,
                   p.image_url, p.in_stock, p.created_at, p.updated_at
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.user_id = $1
            ORDER BY ci.added_at, ci.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
