/// Monthly budget endpoints
///
/// ```text
/// GET /api/budget?month=6&year=2025     (defaults to the current UTC month)
/// PUT /api/budget                       {"amount": 4500, "month": 6, "year": 2025}
/// ```
///
/// Setting a budget for a month that already has one replaces the amount.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
};
use axum::{extract::State, Json};
use cobudget_shared::{
    auth::UserContext,
    models::budget::{Budget, BudgetPeriod},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct BudgetQuery {
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: Option<i32>,

    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: Option<i32>,
}

impl BudgetQuery {
    fn period(&self) -> BudgetPeriod {
        let current = BudgetPeriod::current();
        BudgetPeriod {
            month: self.month.unwrap_or(current.month),
            year: self.year.unwrap_or(current.year),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    pub success: bool,
    pub month: i32,
    pub year: i32,

    /// `None` when no budget is set for the month
    pub budget: Option<Budget>,
}

pub async fn get_budget(
    State(state): State<AppState>,
    user: UserContext,
    ApiQuery(query): ApiQuery<BudgetQuery>,
) -> ApiResult<Json<BudgetResponse>> {
    query.validate()?;
    let period = query.period();

    let budget = Budget::find_for_period(&state.db, user.user_id, period).await?;

    Ok(Json(BudgetResponse {
        success: true,
        month: period.month,
        year: period.year,
        budget,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetBudgetRequest {
    pub amount: Decimal,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: i32,
}

/// Sets the caller's budget for a month
///
/// # Errors
///
/// 400 if the amount is negative or the month/year is out of range.
pub async fn set_budget(
    State(state): State<AppState>,
    user: UserContext,
    ApiJson(req): ApiJson<SetBudgetRequest>,
) -> ApiResult<Json<BudgetResponse>> {
    req.validate()?;
    if req.amount < Decimal::ZERO {
        return Err(ApiError::BadRequest("Amount must not be negative".to_string()));
    }

    let period = BudgetPeriod {
        month: req.month,
        year: req.year,
    };
    let budget = Budget::upsert(&state.db, user.user_id, period, req.amount).await?;

    tracing::info!(
        user_id = %user.user_id,
        month = period.month,
        year = period.year,
        "Budget set"
    );

    Ok(Json(BudgetResponse {
        success: true,
        month: period.month,
        year: period.year,
        budget: Some(budget),
    }))
}
