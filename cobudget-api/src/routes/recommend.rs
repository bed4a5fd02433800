/// Product recommendation endpoints
///
/// # Endpoints
///
/// ```text
/// POST /api/recommend          {"prompt": "fresh milk", "budget": 100}
/// POST /recommend-smart        {"keyword": "biryani"}
/// POST /recommend-nutrition    {"preferences": ["eggs", "almonds"]}
/// ```
///
/// All three read the catalog through the repository and rank or filter it
/// in memory.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::{extract::State, Json};
use cobudget_shared::{
    auth::UserContext,
    models::{
        product::Product,
        recommendation_log::{CreateRecommendationLog, RecommendationLog},
    },
    recommend::{self, RecommendQuery, ScoredProduct},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub prompt: String,

    /// Price ceiling; missing, zero or negative means no ceiling
    #[serde(default)]
    pub budget: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub products: Vec<ScoredProduct>,
    pub count: usize,

    /// Normalized prompt
    pub query: String,

    pub budget: Decimal,
}

/// Ranks in-stock products against a free-text prompt
///
/// Each search is also written to `recommendation_logs`, attributed to the
/// caller when one is signed in. A failed log write is logged and otherwise
/// ignored.
///
/// # Errors
///
/// - 400 if the prompt is blank
/// - 500 if the catalog cannot be read
pub async fn recommend_products(
    State(state): State<AppState>,
    user: Option<UserContext>,
    ApiJson(req): ApiJson<RecommendRequest>,
) -> ApiResult<Json<RecommendResponse>> {
    let query = RecommendQuery::new(&req.prompt, req.budget.unwrap_or(Decimal::ZERO));
    if query.is_empty() {
        return Err(ApiError::BadRequest("Prompt is required".to_string()));
    }

    let products = state.catalog.list_in_stock().await?;
    let recommended = recommend::recommend(&products, &query);

    tracing::debug!(
        query = %query.prompt,
        budget = %query.budget,
        results = recommended.len(),
        "Scored catalog for prompt"
    );

    let log = CreateRecommendationLog {
        user_id: user.map(|u| u.user_id),
        search_prompt: query.prompt.clone(),
        budget_amount: (query.budget > Decimal::ZERO).then_some(query.budget),
        results_count: recommended.len() as i32,
    };
    if let Err(e) = RecommendationLog::create(&state.db, log).await {
        tracing::warn!(error = %e, "Failed to record recommendation search");
    }

    Ok(Json(RecommendResponse {
        success: true,
        count: recommended.len(),
        products: recommended,
        query: query.prompt,
        budget: query.budget,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SmartRequest {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Deserialize)]
pub struct NutritionRequest {
    #[serde(default)]
    pub preferences: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub products: Vec<Product>,
    pub count: usize,
}

impl SuggestionsResponse {
    fn new(products: Vec<Product>) -> Self {
        Self {
            success: true,
            count: products.len(),
            products,
        }
    }
}

/// Suggests products for an occasion keyword; unknown keywords give none
pub async fn recommend_smart(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SmartRequest>,
) -> ApiResult<Json<SuggestionsResponse>> {
    let products = state.catalog.list_in_stock().await?;
    let found = recommend::recommend_smart(&products, &req.keyword);

    Ok(Json(SuggestionsResponse::new(found)))
}

/// Suggests products tagged with any of the caller's dietary preferences
pub async fn recommend_nutrition(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NutritionRequest>,
) -> ApiResult<Json<SuggestionsResponse>> {
    let products = state.catalog.list_in_stock().await?;
    let found = recommend::recommend_nutrition(&products, &req.preferences);

    Ok(Json(SuggestionsResponse::new(found)))
}
