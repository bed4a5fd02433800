/// Personal cart endpoints
///
/// Every route here acts on the signed-in caller's own cart. Adding a product
/// that is already in the cart increases that line's quantity.
///
/// # Endpoints
///
/// ```text
/// GET    /api/cart
/// POST   /api/cart/add        {"product_id": "DB001", "quantity": 2}
/// DELETE /api/cart/:item_id
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
    routes::shared_cart::default_quantity,
};
use axum::{extract::State, Json};
use cobudget_shared::{
    auth::UserContext,
    models::{
        budget::{Budget, BudgetPeriod},
        cart_item::{cart_total, CartItem, CartLine},
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// The caller's cart measured against this month's budget
#[derive(Debug, Serialize)]
pub struct CartView {
    pub success: bool,
    pub items: Vec<CartLine>,
    pub total: Decimal,

    /// This month's budget, if one is set
    pub budget: Option<Decimal>,

    /// `budget - total`; negative when over budget
    pub remaining: Option<Decimal>,

    pub over_budget: bool,
}

impl CartView {
    pub fn build(items: Vec<CartLine>, budget: Option<Decimal>) -> Self {
        let total = cart_total(&items);
        let remaining = budget.map(|amount| amount - total);

        Self {
            success: true,
            items,
            total,
            budget,
            remaining,
            over_budget: remaining.is_some_and(|left| left < Decimal::ZERO),
        }
    }
}

pub async fn get_cart(
    State(state): State<AppState>,
    user: UserContext,
) -> ApiResult<Json<CartView>> {
    let items = CartItem::list_lines(&state.db, user.user_id).await?;
    let budget = Budget::find_for_period(&state.db, user.user_id, BudgetPeriod::current())
        .await?
        .map(|b| b.amount);

    Ok(Json(CartView::build(items, budget)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    #[validate(length(min = 1, max = 50, message = "Product ID is required"))]
    pub product_id: String,

    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 1000, message = "Quantity must be between 1 and 1000"))]
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub success: bool,
    pub item: CartItem,
}

/// Adds a product to the caller's cart
///
/// # Errors
///
/// - 400 on invalid quantity
/// - 404 if the product does not exist
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: UserContext,
    ApiJson(req): ApiJson<AddToCartRequest>,
) -> ApiResult<Json<AddToCartResponse>> {
    req.validate()?;

    if state.catalog.find(&req.product_id).await?.is_none() {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    let item = CartItem::add(&state.db, user.user_id, &req.product_id, req.quantity).await?;

    Ok(Json(AddToCartResponse {
        success: true,
        item,
    }))
}

#[derive(Debug, Serialize)]
pub struct RemoveFromCartResponse {
    pub success: bool,
}

/// Removes one of the caller's lines; other users' lines are never touched
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: UserContext,
    ApiPath(item_id): ApiPath<Uuid>,
) -> ApiResult<Json<RemoveFromCartResponse>> {
    if !CartItem::remove(&state.db, user.user_id, item_id).await? {
        return Err(ApiError::NotFound("Cart item not found".to_string()));
    }

    Ok(Json(RemoveFromCartResponse { success: true }))
}
