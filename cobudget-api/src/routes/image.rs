/// Product image lookup
///
/// ```text
/// GET /walmart-image?q=amul+fresh+milk
/// ```
///
/// Responds `{"image": "<url>"}`, with an empty string when nothing was found.
/// A failed upstream request is a 500.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiQuery,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image: String,
}

pub async fn walmart_image(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ImageQuery>,
) -> ApiResult<Json<ImageResponse>> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(ApiError::BadRequest("Missing query".to_string()));
    }

    let image = match state.images.find_image(q).await? {
        Some(url) => {
            tracing::info!(query = q, image = %url, "Image found");
            url
        }
        None => {
            tracing::warn!(query = q, lookup = state.images.name(), "No image found");
            String::new()
        }
    };

    Ok(Json(ImageResponse { image }))
}
