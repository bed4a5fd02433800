/// Shared cart endpoints
///
/// A shared cart is addressed by its 8-character share code. Anyone with the
/// code may view it; adding items and creating carts need a signed-in caller,
/// and only the creator may close a cart.
///
/// # Endpoints
///
/// ```text
/// POST /api/shared-cart/create          {"name": "Flat groceries"}
/// GET  /api/shared-cart/join/:id
/// GET  /api/shared-cart/:id/items
/// POST /api/shared-cart/:id/add         {"product_id": "DB001", "quantity": 2}
/// POST /api/shared-cart/:id/close
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
};
use axum::{body::Bytes, extract::State, Json};
use chrono::{DateTime, Utc};
use cobudget_shared::{
    auth::UserContext,
    models::shared_cart::{
        CreateSharedCartItem, CreateSharedCartSession, SharedCartItem, SharedCartSession,
        SharedCartSummary, DEFAULT_CART_NAME,
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateSharedCartRequest {
    /// Defaults to "Shared Cart" when missing or blank
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

impl CreateSharedCartRequest {
    /// Parses an optional JSON body; an empty body means all defaults
    fn from_body(body: &[u8]) -> ApiResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
    }
}

#[derive(Debug, Serialize)]
pub struct CreateSharedCartResponse {
    pub success: bool,
    pub session_id: String,
    pub name: String,
}

/// Opens a new shared cart owned by the caller
///
/// The body is optional; without one the cart gets the default name. A body
/// that is present must be valid JSON.
pub async fn create_shared_cart(
    State(state): State<AppState>,
    user: UserContext,
    body: Bytes,
) -> ApiResult<Json<CreateSharedCartResponse>> {
    let req = CreateSharedCartRequest::from_body(&body)?;
    req.validate()?;

    let name = req
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_CART_NAME.to_string());

    let session = SharedCartSession::create(
        &state.db,
        CreateSharedCartSession {
            name,
            created_by_user_id: user.user_id,
        },
    )
    .await?;

    tracing::info!(session_id = %session.id, user_id = %user.user_id, "Shared cart created");

    Ok(Json(CreateSharedCartResponse {
        success: true,
        session_id: session.id,
        name: session.name,
    }))
}

#[derive(Debug, Serialize)]
pub struct JoinedSession {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct JoinSharedCartResponse {
    pub success: bool,
    pub session: JoinedSession,
}

/// Looks up an open cart by share code
///
/// # Errors
///
/// 404 if the code is unknown or the cart was closed.
pub async fn join_shared_cart(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<String>,
) -> ApiResult<Json<JoinSharedCartResponse>> {
    let session = SharedCartSession::find_by_id(&state.db, &session_id)
        .await?
        .filter(|session| session.is_active)
        .ok_or_else(|| ApiError::NotFound("Cart not found or inactive".to_string()))?;

    Ok(Json(JoinSharedCartResponse {
        success: true,
        session: JoinedSession {
            id: session.id,
            name: session.name,
            created_at: session.created_at,
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct SessionRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SharedCartItemsResponse {
    pub success: bool,
    pub session: SessionRef,

    #[serde(flatten)]
    pub summary: SharedCartSummary,
}

/// Lists a cart's lines with per-contributor and overall totals
///
/// Closed carts can still be viewed.
pub async fn get_shared_cart_items(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<String>,
) -> ApiResult<Json<SharedCartItemsResponse>> {
    let session = find_session(&state, &session_id).await?;
    let lines = SharedCartItem::list_lines(&state.db, &session.id).await?;

    Ok(Json(SharedCartItemsResponse {
        success: true,
        session: SessionRef {
            id: session.id,
            name: session.name,
        },
        summary: SharedCartSummary::from_lines(lines),
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddSharedItemRequest {
    #[validate(length(min = 1, max = 50, message = "Product ID is required"))]
    pub product_id: String,

    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 1000, message = "Quantity must be between 1 and 1000"))]
    pub quantity: i32,
}

pub(crate) fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Serialize)]
pub struct AddSharedItemResponse {
    pub success: bool,
    pub item_id: Uuid,
}

/// Appends a line to a cart on the caller's behalf
///
/// Adding a product that is already in the cart creates a second line.
///
/// # Errors
///
/// - 404 if the cart or product does not exist
/// - 409 if the cart was closed
pub async fn add_to_shared_cart(
    State(state): State<AppState>,
    user: UserContext,
    ApiPath(session_id): ApiPath<String>,
    ApiJson(req): ApiJson<AddSharedItemRequest>,
) -> ApiResult<Json<AddSharedItemResponse>> {
    req.validate()?;

    let session = find_session(&state, &session_id).await?;
    if !session.is_active {
        return Err(ApiError::Conflict("Cart is closed".to_string()));
    }

    if state.catalog.find(&req.product_id).await?.is_none() {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    let item = SharedCartItem::create(
        &state.db,
        CreateSharedCartItem {
            session_id: session.id,
            product_id: req.product_id,
            added_by_user_id: user.user_id,
            quantity: req.quantity,
        },
    )
    .await?;

    tracing::info!(
        session_id = %item.session_id,
        product_id = %item.product_id,
        user_id = %user.user_id,
        "Item added to shared cart"
    );

    Ok(Json(AddSharedItemResponse {
        success: true,
        item_id: item.id,
    }))
}

#[derive(Debug, Serialize)]
pub struct CloseSharedCartResponse {
    pub success: bool,
}

/// Closes a cart; only its creator may do this
pub async fn close_shared_cart(
    State(state): State<AppState>,
    user: UserContext,
    ApiPath(session_id): ApiPath<String>,
) -> ApiResult<Json<CloseSharedCartResponse>> {
    let session = find_session(&state, &session_id).await?;

    if session.created_by_user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "Only the cart owner can close it".to_string(),
        ));
    }

    SharedCartSession::deactivate(&state.db, &session.id).await?;
    tracing::info!(session_id = %session.id, "Shared cart closed");

    Ok(Json(CloseSharedCartResponse { success: true }))
}

async fn find_session(state: &AppState, session_id: &str) -> ApiResult<SharedCartSession> {
    SharedCartSession::find_by_id(&state.db, session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Cart not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_optional() {
        let req = CreateSharedCartRequest::from_body(b"").unwrap();
        assert!(req.name.is_none());

        let req = CreateSharedCartRequest::from_body(b" \n").unwrap();
        assert!(req.name.is_none());

        let req = CreateSharedCartRequest::from_body(br#"{"name": "Flat"}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Flat"));
    }

    #[test]
    fn test_create_body_malformed() {
        let err = CreateSharedCartRequest::from_body(b"{not json").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = CreateSharedCartRequest::from_body(br#"{"name": 7}"#).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_add_quantity_defaults_to_one() {
        let req: AddSharedItemRequest =
            serde_json::from_str(r#"{"product_id": "DB001"}"#).unwrap();
        assert_eq!(req.quantity, 1);
        assert!(req.validate().is_ok());
    }
}
