/// Recipe suggestions
///
/// ```text
/// POST /api/recipe-bot    {"prompt": "paneer and spinach"}
/// ```
///
/// The prompt is forwarded to the configured recipe provider and the first
/// completion is returned verbatim as `recipe`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub success: bool,
    pub recipe: String,
}

/// # Errors
///
/// - 400 if the prompt is blank
/// - 500 if no provider is configured or the provider call fails
pub async fn recipe_bot(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RecipeRequest>,
) -> ApiResult<Json<RecipeResponse>> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(ApiError::BadRequest("Prompt required".to_string()));
    }

    let provider = state
        .recipes
        .as_ref()
        .ok_or_else(|| ApiError::InternalError("Mistral API key missing".to_string()))?;

    let recipe = provider.recipes(prompt).await?;
    tracing::debug!(provider = provider.name(), chars = recipe.len(), "Recipe generated");

    Ok(Json(RecipeResponse {
        success: true,
        recipe,
    }))
}
