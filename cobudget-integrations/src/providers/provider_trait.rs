/// Provider traits and error types
///
/// A provider wraps one third-party HTTP service. The API server only talks to
/// the traits defined here, so tests can swap in the mocks from
/// [`super::mock`].
///
/// # Provider Contract
///
/// Providers must:
/// 1. Be `Send + Sync` so one instance can be shared across requests
/// 2. Make at most the documented number of outbound requests per call
/// 3. Never retry on their own
/// 4. Report transport failures as [`ProviderError`], not as empty results
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use cobudget_integrations::providers::{ProviderResult, RecipeProvider};
///
/// struct CannedRecipes;
///
/// #[async_trait]
/// impl RecipeProvider for CannedRecipes {
///     fn name(&self) -> &str {
///         "canned"
///     }
///
///     async fn recipes(&self, prompt: &str) -> ProviderResult<String> {
///         Ok(format!("Toast with {}", prompt))
///     }
/// }
/// ```

use async_trait::async_trait;

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Caller input the provider cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider is missing required configuration
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Request could not be sent or the response body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Upstream answered 2xx with an unexpected body
    #[error("Unexpected upstream response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// True for failures caused by the caller rather than the upstream service
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProviderError::InvalidInput(_))
    }
}

/// Provider result type alias
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Generates recipe suggestions for a free-text prompt
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Returns the provider's answer verbatim
    async fn recipes(&self, prompt: &str) -> ProviderResult<String>;
}

/// Finds a product image URL for a search query
#[async_trait]
pub trait ImageLookup: Send + Sync {
    fn name(&self) -> &str;

    /// Returns `Ok(None)` when the lookup ran but found nothing
    async fn find_image(&self, query: &str) -> ProviderResult<Option<String>>;
}
