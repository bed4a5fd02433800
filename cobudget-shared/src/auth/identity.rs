/// Caller identity from request headers
///
/// The front end authenticates shoppers with an external provider and
/// forwards the result on every request:
///
/// - `X-User-Uid`: the provider's user ID
/// - `X-User-Email`: the user's email address
///
/// Middleware turns these into a [`UserContext`] (creating the `users` row on
/// first sight) and stores it in the request extensions. Handlers that need a
/// caller take `UserContext` as an extractor; handlers where identity is
/// optional take `Option<UserContext>`.
///
/// # Example
///
/// ```
/// use cobudget_shared::auth::identity::UserContext;
///
/// async fn whoami(user: UserContext) -> String {
///     format!("{} ({})", user.email, user.user_id)
/// }
/// ```

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{UpsertUser, User};

pub const USER_UID_HEADER: &str = "x-user-uid";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Column widths of `users.external_uid` and `users.email`
const MAX_UID_LEN: usize = 128;
const MAX_EMAIL_LEN: usize = 120;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Sign-in required")]
    Missing,

    #[error("Invalid identity header: {0}")]
    InvalidHeader(String),

    #[error("Email is already registered to another account")]
    EmailTaken,

    #[error("Failed to resolve user: {0}")]
    Database(#[from] sqlx::Error),
}

impl IdentityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::Missing => StatusCode::UNAUTHORIZED,
            IdentityError::InvalidHeader(_) => StatusCode::BAD_REQUEST,
            IdentityError::EmailTaken => StatusCode::CONFLICT,
            IdentityError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            IdentityError::Missing => "unauthorized",
            IdentityError::InvalidHeader(_) => "bad_request",
            IdentityError::EmailTaken => "conflict",
            IdentityError::Database(_) => "internal_error",
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let message = match &self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Failed to resolve caller identity");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "success": false,
            "error": self.error_code(),
            "message": message,
        }));

        (self.status_code(), body).into_response()
    }
}

/// Identity as asserted by the headers, before it is resolved to a user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub external_uid: String,
    pub email: String,
}

impl IdentityClaims {
    /// Reads the identity headers
    ///
    /// Returns `Ok(None)` when neither header is present. Sending only one of
    /// them, or a malformed value, is an error.
    pub fn from_headers(headers: &HeaderMap) -> Result<Option<Self>, IdentityError> {
        let uid = header_value(headers, USER_UID_HEADER)?;
        let email = header_value(headers, USER_EMAIL_HEADER)?;

        match (uid, email) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(IdentityError::InvalidHeader(
                "X-User-Email is required with X-User-Uid".to_string(),
            )),
            (None, Some(_)) => Err(IdentityError::InvalidHeader(
                "X-User-Uid is required with X-User-Email".to_string(),
            )),
            (Some(external_uid), Some(email)) => {
                if external_uid.len() > MAX_UID_LEN {
                    return Err(IdentityError::InvalidHeader(
                        "X-User-Uid is too long".to_string(),
                    ));
                }
                if email.len() > MAX_EMAIL_LEN || !looks_like_email(&email) {
                    return Err(IdentityError::InvalidHeader(
                        "X-User-Email is not a valid email address".to_string(),
                    ));
                }

                Ok(Some(Self { external_uid, email }))
            }
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, IdentityError> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| IdentityError::InvalidHeader(format!("{} must be ASCII", name)))?
        .trim();

    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value.to_string()))
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

/// Resolved caller identity, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// Internal user ID
    pub user_id: Uuid,

    pub external_uid: String,

    pub email: String,
}

impl UserContext {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            external_uid: user.external_uid.clone(),
            email: user.email.clone(),
        }
    }
}

/// Resolves the identity headers to a user, creating the user if needed
///
/// Returns `Ok(None)` for anonymous requests.
///
/// # Errors
///
/// [`IdentityError::EmailTaken`] if the email already belongs to a different
/// external id.
pub async fn resolve_identity(
    pool: &PgPool,
    headers: &HeaderMap,
) -> Result<Option<UserContext>, IdentityError> {
    let Some(claims) = IdentityClaims::from_headers(headers)? else {
        return Ok(None);
    };

    let user = User::upsert(
        pool,
        UpsertUser {
            external_uid: claims.external_uid,
            email: claims.email,
        },
    )
    .await
    .map_err(|e| match e {
        // external_uid conflicts are absorbed by the upsert, so this is the email
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            IdentityError::EmailTaken
        }
        other => IdentityError::Database(other),
    })?;

    Ok(Some(UserContext::from_user(&user)))
}

#[async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = IdentityError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserContext>()
            .cloned()
            .ok_or(IdentityError::Missing)
    }
}
