/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use cobudget_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config)?;
/// let app = cobudget_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{identity::identity_layer, security::SecurityHeadersLayer},
};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use cobudget_integrations::providers::{
    mistral::DEFAULT_TEMPERATURE, ImageLookup, ImageSearchClient, ImageSearchConfig,
    MistralClient, MistralConfig, ProviderResult, RecipeProvider,
};
use cobudget_shared::auth::identity::{USER_EMAIL_HEADER, USER_UID_HEADER};
use cobudget_shared::catalog::{CatalogRepository, PgCatalog};
use sqlx::PgPool;
use std::{sync::Arc, time::Duration};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Everything inside is either a pool handle or behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Product catalog
    pub catalog: Arc<dyn CatalogRepository>,

    /// Recipe provider; `None` when no API key is configured
    pub recipes: Option<Arc<dyn RecipeProvider>>,

    /// Product image lookup
    pub images: Arc<dyn ImageLookup>,
}

impl AppState {
    /// Creates state backed by the PostgreSQL catalog and the real HTTP providers
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(db: PgPool, config: Config) -> ProviderResult<Self> {
        let recipes = match &config.recipes.api_key {
            Some(api_key) => {
                let client = MistralClient::new(MistralConfig {
                    api_key: api_key.clone(),
                    api_url: config.recipes.api_url.clone(),
                    model: config.recipes.model.clone(),
                    temperature: DEFAULT_TEMPERATURE,
                })?;
                Some(Arc::new(client) as Arc<dyn RecipeProvider>)
            }
            None => {
                tracing::warn!("MISTRAL_API_KEY not set; recipe suggestions are disabled");
                None
            }
        };

        let images = ImageSearchClient::new(ImageSearchConfig {
            search_timeout: Duration::from_secs(config.images.timeout_secs),
            ..Default::default()
        })?;

        let catalog = PgCatalog::new(db.clone());

        Ok(Self::with_parts(
            db,
            config,
            Arc::new(catalog),
            recipes,
            Arc::new(images),
        ))
    }

    /// Creates state from explicit parts (tests, demos)
    pub fn with_parts(
        db: PgPool,
        config: Config,
        catalog: Arc<dyn CatalogRepository>,
        recipes: Option<Arc<dyn RecipeProvider>>,
        images: Arc<dyn ImageLookup>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            catalog,
            recipes,
            images,
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                          # Landing page
/// ├── GET  /health                    # Health check
/// ├── GET  /walmart-image?q=          # Product image lookup
/// ├── POST /recommend-smart           # Occasion suggestions
/// ├── POST /recommend-nutrition       # Diet suggestions
/// └── /api/
///     ├── POST /recommend             # Keyword recommendation
///     ├── GET  /products              # Full catalog
///     ├── POST /recipe-bot            # Recipe suggestions
///     ├── POST /init_database         # Migrate + seed
///     ├── /shared-cart/
///     │   ├── POST /create            # (caller required)
///     │   ├── GET  /join/:id
///     │   ├── GET  /:id/items
///     │   ├── POST /:id/add           # (caller required)
///     │   └── POST /:id/close         # (owner only)
///     ├── /cart/                      # (caller required)
///     │   ├── GET    /
///     │   ├── POST   /add
///     │   └── DELETE /:item_id
///     └── /budget                     # (caller required)
///         ├── GET  ?month&year
///         └── PUT
/// ```
///
/// # Middleware Stack
///
/// Identity resolution (`X-User-Uid` / `X-User-Email`) is a route layer on
/// the routes that read the caller. Applied to everything, innermost first:
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Panic recovery (500 instead of a dropped connection)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let shared_cart_routes = Router::new()
        .route("/create", post(routes::shared_cart::create_shared_cart))
        .route("/:session_id/add", post(routes::shared_cart::add_to_shared_cart))
        .route("/:session_id/close", post(routes::shared_cart::close_shared_cart))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            identity_layer,
        ))
        .route("/join/:session_id", get(routes::shared_cart::join_shared_cart))
        .route("/:session_id/items", get(routes::shared_cart::get_shared_cart_items));

    let cart_routes = Router::new()
        .route("/", get(routes::cart::get_cart))
        .route("/add", post(routes::cart::add_to_cart))
        .route("/:item_id", delete(routes::cart::remove_from_cart));

    // Routes that read the caller; the rest never touch the users table
    let caller_routes = Router::new()
        .route("/recommend", post(routes::recommend::recommend_products))
        .route(
            "/budget",
            get(routes::budget::get_budget).put(routes::budget::set_budget),
        )
        .nest("/cart", cart_routes)
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            identity_layer,
        ));

    let api_routes = Router::new()
        .route("/products", get(routes::products::list_products))
        .route("/recipe-bot", post(routes::recipe::recipe_bot))
        .route("/init_database", post(routes::admin::init_database))
        .merge(caller_routes)
        .nest("/shared-cart", shared_cart_routes);

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                HeaderName::from_static(USER_UID_HEADER),
                HeaderName::from_static(USER_EMAIL_HEADER),
            ])
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600))
    };

    Router::new()
        .route("/", get(routes::index::index))
        .route("/health", get(routes::health::health_check))
        .route("/walmart-image", get(routes::image::walmart_image))
        .route("/recommend-smart", post(routes::recommend::recommend_smart))
        .route("/recommend-nutrition", post(routes::recommend::recommend_nutrition))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
