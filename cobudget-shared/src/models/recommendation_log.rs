/// Audit trail of recommendation searches
///
/// Rows are appended after every successful `/api/recommend` call and are
/// never read back by the service itself.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Longest prompt stored; the column is VARCHAR(255)
pub const MAX_LOGGED_PROMPT_CHARS: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecommendationLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub search_prompt: String,
    pub budget_amount: Option<Decimal>,
    pub results_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecommendationLog {
    pub user_id: Option<Uuid>,
    pub search_prompt: String,
    pub budget_amount: Option<Decimal>,
    pub results_count: i32,
}

impl RecommendationLog {
    /// Appends a log row, truncating over-long prompts
    pub async fn create(
        pool: &PgPool,
        data: CreateRecommendationLog,
    ) -> Result<Self, sqlx::Error> {
        let prompt: String = data
            .search_prompt
            .chars()
            .take(MAX_LOGGED_PROMPT_CHARS)
            .collect();

        sqlx::query_as::<_, RecommendationLog>(
            r#"
            INSERT INTO recommendation_logs (user_id, search_prompt, budget_amount, results_count)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, search_prompt, budget_amount, results_count, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(prompt)
        .bind(data.budget_amount)
        .bind(data.results_count)
        .fetch_one(pool)
        .await
    }
}
