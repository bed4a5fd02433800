/// Caller identity middleware
///
/// Installed as a route layer on the routes that read the caller. When the
/// identity headers are present the caller is resolved to a `users` row and a
/// [`UserContext`] is inserted into the request extensions; when they are
/// absent the request passes through untouched and routes that require a
/// caller reject it with 401.
///
/// Malformed headers are rejected with 400, and an email that already belongs
/// to another account with 409.

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use cobudget_shared::auth::{resolve_identity, UserContext};

pub async fn identity_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(user) = resolve_identity(&state.db, req.headers()).await? {
        tracing::debug!(user_id = %user.user_id, "Resolved caller identity");
        req.extensions_mut().insert::<UserContext>(user);
    }

    Ok(next.run(req).await)
}
