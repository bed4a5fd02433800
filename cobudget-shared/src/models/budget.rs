/// Monthly budget model
///
/// A user has at most one budget per calendar month. The store enforces this
/// with `unique_user_month_budget`; [`Budget::upsert`] relies on it to replace
/// the amount instead of inserting a second row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE budgets (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     amount NUMERIC(10, 2) NOT NULL,
///     month INTEGER NOT NULL,
///     year INTEGER NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT unique_user_month_budget UNIQUE (user_id, month, year)
/// );
/// ```

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    /// 1-12
    pub month: i32,
    pub year: i32,
}

impl BudgetPeriod {
    pub fn of(at: DateTime<Utc>) -> Self {
        Self {
            month: at.month() as i32,
            year: at.year(),
        }
    }

    pub fn current() -> Self {
        Self::of(Utc::now())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub month: i32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Sets the budget for a month, replacing any existing amount
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        period: BudgetPeriod,
        amount: Decimal,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Budget>(
            r#"
            INSERT INTO budgets (user_id, amount, month, year)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT unique_user_month_budget
            DO UPDATE SET amount = EXCLUDED.amount, updated_at = NOW()
            RETURNING id, user_id, amount, month, year, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .bind(period.month)
        .bind(period.year)
        .fetch_one(pool)
        .await
    }

    /// Finds the budget a user set for a month
    pub async fn find_for_period(
        pool: &PgPool,
        user_id: Uuid,
        period: BudgetPeriod,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Budget>(
            r#"
            SELECT id, user_id, amount, month, year, created_at, updated_at
            FROM budgets
            WHERE user_id = $1 AND month = $2 AND year = $3
            "#,
        )
        .bind(user_id)
        .bind(period.month)
        .bind(period.year)
        .fetch_optional(pool)
        .await
    }

    /// All budgets of a user, newest month first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Budget>(
            r#"
            SELECT id, user_id, amount, month, year, created_at, updated_at
            FROM budgets
            WHERE user_id = $1
            ORDER BY year DESC, month DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_budget_period_of_date() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(BudgetPeriod::of(at), BudgetPeriod { month: 12, year: 2025 });

        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(BudgetPeriod::of(at), BudgetPeriod { month: 1, year: 2026 });
    }
}
