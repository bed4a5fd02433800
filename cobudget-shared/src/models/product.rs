/// Product model and database operations
///
/// Products are the purchasable catalog entries. Their string ID is assigned
/// by the catalog (e.g. `"DB001"`) and never changes; price, stock flag and
/// description may be edited in place.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE products (
///     id VARCHAR(50) PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     price NUMERIC(10, 2) NOT NULL,
///     category VARCHAR(50) NOT NULL,
///     tags TEXT NOT NULL DEFAULT '[]',
///     description TEXT,
///     image_url VARCHAR(500),
///     in_stock BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::ops::Deref;

/// Tag list stored as a JSON array in a TEXT column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Tags(tags.into_iter().map(Into::into).collect())
    }

    /// Serialized column value
    pub fn to_column(&self) -> String {
        // A Vec<String> always serializes.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    /// True if any tag equals `wanted`, ignoring ASCII case
    pub fn contains_ignore_case(&self, wanted: &str) -> bool {
        self.0.iter().any(|tag| tag.eq_ignore_ascii_case(wanted))
    }
}

impl Deref for Tags {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<String> for Tags {
    type Error = serde_json::Error;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if raw.trim().is_empty() {
            return Ok(Tags::default());
        }
        serde_json::from_str(&raw).map(Tags)
    }
}

/// A catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Catalog ID, e.g. "FV001"
    pub id: String,

    pub name: String,

    /// Unit price in rupees
    pub price: Decimal,

    pub category: String,

    #[sqlx(try_from = "String")]
    pub tags: Tags,

    pub description: Option<String>,

    pub image_url: Option<String>,

    /// Out-of-stock products are listed but never recommended
    pub in_stock: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub tags: Tags,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub in_stock: bool,
}

/// Mutable product fields; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub price: Option<Decimal>,
    pub in_stock: Option<bool>,
    pub description: Option<String>,
}

const PRODUCT_COLUMNS: &str =
    "id, name, price, category, tags, description, image_url, in_stock, created_at, updated_at";

impl Product {
    /// Inserts a product
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint error if the ID is taken.
    pub async fn create(pool: &PgPool, data: CreateProduct) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (id, name, price, category, tags, description, image_url, in_stock)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PRODUCT_COLUMNS}"
        );

        sqlx::query_as::<_, Product>(&query)
            .bind(data.id)
            .bind(data.name)
            .bind(data.price)
            .bind(data.category)
            .bind(data.tags.to_column())
            .bind(data.description)
            .bind(data.image_url)
            .bind(data.in_stock)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");

        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lists the whole catalog ordered by ID
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");

        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Lists products currently in stock, ordered by ID
    pub async fn list_in_stock(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let query =
            format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE in_stock = TRUE ORDER BY id");

        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Updates price, stock flag or description
    ///
    /// Returns `None` if no product has this ID.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        data: UpdateProduct,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE products
             SET price = COALESCE($2, price),
                 in_stock = COALESCE($3, in_stock),
                 description = COALESCE($4, description),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        );

        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(data.price)
            .bind(data.in_stock)
            .bind(data.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
