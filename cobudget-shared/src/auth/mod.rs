/// Caller identity
///
/// Shoppers sign in with an external provider; this service only sees the
/// provider's user ID and email, forwarded as request headers.
///
/// # Modules
///
/// - [`identity`]: header parsing, user resolution and the [`UserContext`]
///   extractor
///
/// # Example
///
/// ```no_run
/// use axum::http::HeaderMap;
/// use cobudget_shared::auth::resolve_identity;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, headers: HeaderMap) -> Result<(), Box<dyn std::error::Error>> {
/// match resolve_identity(&pool, &headers).await? {
///     Some(user) => println!("Request from {}", user.email),
///     None => println!("Anonymous request"),
/// }
/// # Ok(())
/// # }
/// ```

pub mod identity;

pub use identity::{resolve_identity, IdentityClaims, IdentityError, UserContext};
