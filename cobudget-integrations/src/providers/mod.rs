/// Outbound service providers
///
/// Each provider wraps one third-party HTTP service behind a trait so the API
/// server can be tested without network access.
///
/// # Provider Types
///
/// - **Recipes**: [`MistralClient`], a chat-completion client
/// - **Images**: [`ImageSearchClient`], a search page scraper
/// - **Mocks**: [`MockRecipeProvider`] and [`MockImageLookup`] for tests
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use cobudget_integrations::providers::{ImageLookup, ImageSearchClient, ImageSearchConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let images: Arc<dyn ImageLookup> = Arc::new(ImageSearchClient::new(ImageSearchConfig::default())?);
///
/// if let Some(url) = images.find_image("amul butter").await? {
///     println!("{}", url);
/// }
/// # Ok(())
/// # }
/// ```

pub mod image_search;
pub mod mistral;
pub mod mock;
pub mod provider_trait;

// Re-export main types
pub use image_search::{ImageScanner, ImageSearchClient, ImageSearchConfig};
pub use mistral::{MistralClient, MistralConfig};
pub use mock::{MockImageLookup, MockRecipeProvider};
pub use provider_trait::{ImageLookup, ProviderError, ProviderResult, RecipeProvider};
