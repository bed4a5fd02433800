//! Common test utilities for API tests
//!
//! - Offline app: in-memory catalog, mock providers and a pool that never
//!   connects (database-backed routes fail fast)
//! - Connected app: real PostgreSQL from `DATABASE_URL`, migrated and seeded
//! - Request builders and a response-to-JSON helper
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cobudget_api::app::{build_router, AppState};
use cobudget_api::config::{ApiConfig, Config, DatabaseConfig, ImageConfig, RecipeConfig};
use cobudget_integrations::providers::{
    mistral::{DEFAULT_API_URL, DEFAULT_MODEL},
    MockImageLookup, MockRecipeProvider, RecipeProvider,
};
use cobudget_shared::auth::identity::{USER_EMAIL_HEADER, USER_UID_HEADER};
use cobudget_shared::catalog::{CatalogRepository, InMemoryCatalog, PgCatalog};
use cobudget_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig as PoolConfig},
};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{sync::Arc, time::Duration};
use tower::Service as _;
use uuid::Uuid;

/// Nothing listens on port 1, so connection attempts fail immediately.
const UNREACHABLE_DATABASE_URL: &str = "postgresql://cobudget@127.0.0.1:1/cobudget_offline";

pub const MOCK_RECIPE: &str = "1. Palak paneer\n2. Paneer bhurji";
pub const MOCK_IMAGE: &str = "https://i5.walmartimages.com/asr/mock-product-image.jpeg";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
    pub config: Config,
    pub recipes: Option<Arc<MockRecipeProvider>>,
    pub images: Arc<MockImageLookup>,
}

impl TestContext {
    /// App with default mocks and no database
    pub fn offline() -> Self {
        Self::offline_with(
            Some(MockRecipeProvider::replying(MOCK_RECIPE)),
            MockImageLookup::found(MOCK_IMAGE),
        )
    }

    /// App with the given mocks and no database
    ///
    /// With `recipes: None` the recipe endpoint behaves as if no API key
    /// were configured.
    pub fn offline_with(recipes: Option<MockRecipeProvider>, images: MockImageLookup) -> Self {
        let db = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy(UNREACHABLE_DATABASE_URL)
            .unwrap();

        Self::build(db, Arc::new(InMemoryCatalog::seeded()), recipes, images)
    }

    /// App over PostgreSQL; `None` when `DATABASE_URL` is unset
    pub async fn connected() -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping database-backed test");
            return None;
        };

        let db = create_pool(PoolConfig {
            url,
            ..Default::default()
        })
        .await
        .unwrap();
        run_migrations(&db).await.unwrap();

        let catalog = PgCatalog::new(db.clone());
        catalog.seed_if_empty().await.unwrap();

        Some(Self::build(
            db,
            Arc::new(catalog),
            Some(MockRecipeProvider::replying(MOCK_RECIPE)),
            MockImageLookup::found(MOCK_IMAGE),
        ))
    }

    fn build(
        db: PgPool,
        catalog: Arc<dyn CatalogRepository>,
        recipes: Option<MockRecipeProvider>,
        images: MockImageLookup,
    ) -> Self {
        let config = test_config();
        let recipes = recipes.map(Arc::new);
        let images = Arc::new(images);

        let recipe_provider = recipes
            .clone()
            .map(|provider| provider as Arc<dyn RecipeProvider>);

        let state = AppState::with_parts(
            db.clone(),
            config.clone(),
            catalog,
            recipe_provider,
            images.clone(),
        );

        TestContext {
            db,
            app: build_router(state),
            config,
            recipes,
            images,
        }
    }

    /// Sends a request through the router and parses the JSON body
    ///
    /// Non-JSON bodies come back as `Value::String`.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
        (status, json)
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: UNREACHABLE_DATABASE_URL.to_string(),
            max_connections: 5,
        },
        recipes: RecipeConfig {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        },
        images: ImageConfig { timeout_secs: 1 },
    }
}

/// A shopper identity unique to one test
#[derive(Debug, Clone)]
pub struct Shopper {
    pub uid: String,
    pub email: String,
}

impl Shopper {
    pub fn new(label: &str) -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Shopper {
            uid: format!("{}-{}", label, id),
            email: format!("{}-{}@example.com", label, id),
        }
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Attaches the identity headers of `shopper`
pub fn as_shopper(mut request: Request<Body>, shopper: &Shopper) -> Request<Body> {
    let headers = request.headers_mut();
    headers.insert(USER_UID_HEADER, shopper.uid.parse().unwrap());
    headers.insert(USER_EMAIL_HEADER, shopper.email.parse().unwrap());
    request
}
