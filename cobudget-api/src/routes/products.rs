/// Catalog listing
///
/// ```text
/// GET /api/products
/// ```
///
/// Returns every product, in stock or not, ordered by ID.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use cobudget_shared::models::product::Product;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<ProductsResponse>> {
    let products = state.catalog.list_all().await?;

    Ok(Json(ProductsResponse {
        success: true,
        products,
    }))
}
