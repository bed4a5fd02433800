/// Mock providers for tests and offline demos
///
/// Both mocks answer from fixed data, never touch the network, and record the
/// inputs they were called with.
///
/// # Example
///
/// ```
/// use cobudget_integrations::providers::{MockRecipeProvider, RecipeProvider};
///
/// # async fn example() {
/// let provider = MockRecipeProvider::replying("Masala oats");
/// assert_eq!(provider.recipes("oats").await.unwrap(), "Masala oats");
/// assert_eq!(provider.prompts(), vec!["oats".to_string()]);
/// # }
/// ```

use std::sync::Mutex;

use async_trait::async_trait;

use super::provider_trait::{ImageLookup, ProviderError, ProviderResult, RecipeProvider};

/// What a mock does when called
#[derive(Debug, Clone)]
enum MockOutcome<T> {
    Succeed(T),
    FailUpstream(u16),
}

impl<T: Clone> MockOutcome<T> {
    fn resolve(&self) -> ProviderResult<T> {
        match self {
            MockOutcome::Succeed(value) => Ok(value.clone()),
            MockOutcome::FailUpstream(status) => Err(ProviderError::UpstreamStatus {
                status: *status,
                body: "mock failure".to_string(),
            }),
        }
    }
}

pub struct MockRecipeProvider {
    outcome: MockOutcome<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockRecipeProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Succeed(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose every call fails with the given upstream status
    pub fn failing(status: u16) -> Self {
        Self {
            outcome: MockOutcome::FailUpstream(status),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RecipeProvider for MockRecipeProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn recipes(&self, prompt: &str) -> ProviderResult<String> {
        if prompt.trim().is_empty() {
            return Err(ProviderError::InvalidInput("Prompt required".to_string()));
        }

        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.outcome.resolve()
    }
}

pub struct MockImageLookup {
    outcome: MockOutcome<Option<String>>,
    queries: Mutex<Vec<String>>,
}

impl MockImageLookup {
    pub fn found(url: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Succeed(Some(url.into())))
    }

    pub fn not_found() -> Self {
        Self::with_outcome(MockOutcome::Succeed(None))
    }

    pub fn failing(status: u16) -> Self {
        Self::with_outcome(MockOutcome::FailUpstream(status))
    }

    fn with_outcome(outcome: MockOutcome<Option<String>>) -> Self {
        Self {
            outcome,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ImageLookup for MockImageLookup {
    fn name(&self) -> &str {
        "mock"
    }

    async fn find_image(&self, query: &str) -> ProviderResult<Option<String>> {
        if query.trim().is_empty() {
            return Err(ProviderError::InvalidInput("Missing query".to_string()));
        }

        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        self.outcome.resolve()
    }
}
