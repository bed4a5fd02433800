/// Database bootstrap
///
/// ```text
/// POST /api/init_database
/// ```
///
/// Applies pending migrations, then seeds the catalog if it is empty. Safe
/// to call repeatedly; later calls report `"seeded": 0`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use cobudget_shared::db::migrations::run_migrations;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InitDatabaseResponse {
    pub success: bool,
    pub message: String,

    /// Products inserted by this call
    pub seeded: usize,
}

pub async fn init_database(State(state): State<AppState>) -> ApiResult<Json<InitDatabaseResponse>> {
    run_migrations(&state.db)
        .await
        .map_err(|e| ApiError::InternalError(format!("Migration failed: {}", e)))?;

    let seeded = state.catalog.seed_if_empty().await?;
    tracing::info!(seeded, "Database initialized");

    Ok(Json(InitDatabaseResponse {
        success: true,
        message: "Database initialized successfully".to_string(),
        seeded,
    }))
}
