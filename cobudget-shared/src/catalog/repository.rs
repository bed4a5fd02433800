/// Catalog access behind a trait
///
/// Every feature that reads products (listing, keyword recommendation,
/// occasion and nutrition suggestions, cart validation) goes through
/// [`CatalogRepository`], so there is exactly one source of product data.
/// [`PgCatalog`] is used in production; [`InMemoryCatalog`] backs tests and
/// local demos without a database.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;

use super::seed::SEED_PRODUCTS;
use crate::models::product::{CreateProduct, Product};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every product, ordered by ID
    async fn list_all(&self) -> CatalogResult<Vec<Product>>;

    /// Products that may be recommended, ordered by ID
    async fn list_in_stock(&self) -> CatalogResult<Vec<Product>>;

    async fn find(&self, id: &str) -> CatalogResult<Option<Product>>;

    /// Loads the built-in catalog if there are no products yet
    ///
    /// Returns the number of products inserted (0 when already populated).
    async fn seed_if_empty(&self) -> CatalogResult<usize>;
}

/// PostgreSQL-backed catalog
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalog {
    async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        Ok(Product::list_all(&self.pool).await?)
    }

    async fn list_in_stock(&self) -> CatalogResult<Vec<Product>> {
        Ok(Product::list_in_stock(&self.pool).await?)
    }

    async fn find(&self, id: &str) -> CatalogResult<Option<Product>> {
        Ok(Product::find_by_id(&self.pool, id).await?)
    }

    async fn seed_if_empty(&self) -> CatalogResult<usize> {
        if Product::count(&self.pool).await? > 0 {
            return Ok(0);
        }

        // One transaction so a half-seeded catalog is never visible.
        let mut tx = self.pool.begin().await?;
        for seed in SEED_PRODUCTS {
            let data = seed.to_create();
            sqlx::query(
                r#"
                INSERT INTO products (id, name, price, category, tags, description, image_url, in_stock)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(data.id)
            .bind(data.name)
            .bind(data.price)
            .bind(data.category)
            .bind(data.tags.to_column())
            .bind(data.description)
            .bind(data.image_url)
            .bind(data.in_stock)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!("Seeded {} products into database", SEED_PRODUCTS.len());
        Ok(SEED_PRODUCTS.len())
    }
}

/// Catalog held in memory
#[derive(Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-loaded with the built-in products
    pub fn seeded() -> Self {
        Self::with_products(SEED_PRODUCTS.iter().map(|seed| seed.to_create()))
    }

    pub fn with_products<I>(products: I) -> Self
    where
        I: IntoIterator<Item = CreateProduct>,
    {
        let now = Utc::now();
        let mut products: Vec<Product> = products
            .into_iter()
            .map(|data| Product {
                id: data.id,
                name: data.name,
                price: data.price,
                category: data.category,
                tags: data.tags,
                description: data.description,
                image_url: data.image_url,
                in_stock: data.in_stock,
                created_at: now,
                updated_at: now,
            })
            .collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            products: RwLock::new(products),
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn list_in_stock(&self) -> CatalogResult<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.in_stock)
            .cloned()
            .collect())
    }

    async fn find(&self, id: &str) -> CatalogResult<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn seed_if_empty(&self) -> CatalogResult<usize> {
        let mut products = self.products.write().await;
        if !products.is_empty() {
            return Ok(0);
        }

        let seeded = InMemoryCatalog::seeded().products.into_inner();
        let count = seeded.len();
        *products = seeded;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Tags;
    use rust_decimal::Decimal;

    fn create(id: &str, in_stock: bool) -> CreateProduct {
        CreateProduct {
            id: id.to_string(),
            name: format!("Item {}", id),
            price: Decimal::from(10),
            category: "Home Needs".to_string(),
            tags: Tags::new(["home"]),
            description: None,
            image_url: None,
            in_stock,
        }
    }

    #[tokio::test]
    async fn test_in_memory_filters_out_of_stock() {
        let catalog = InMemoryCatalog::with_products(vec![create("B", true), create("A", false)]);

        let all = catalog.list_all().await.unwrap();
        assert_eq!(all.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["A", "B"]);

        let in_stock = catalog.list_in_stock().await.unwrap();
        assert_eq!(in_stock.len(), 1);
        assert_eq!(in_stock[0].id, "B");
    }

    #[tokio::test]
    async fn test_in_memory_find() {
        let catalog = InMemoryCatalog::seeded();
        let milk = catalog.find("DB001").await.unwrap().unwrap();
        assert_eq!(milk.name, "Amul Fresh Milk");
        assert!(catalog.find("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_seed_only_when_empty() {
        let catalog = InMemoryCatalog::new();
        assert_eq!(catalog.seed_if_empty().await.unwrap(), SEED_PRODUCTS.len());
        assert_eq!(catalog.seed_if_empty().await.unwrap(), 0);
        assert_eq!(catalog.list_all().await.unwrap().len(), SEED_PRODUCTS.len());
    }
}
