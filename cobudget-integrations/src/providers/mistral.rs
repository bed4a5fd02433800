/// Recipe suggestions from a Mistral chat-completion endpoint
///
/// Each call sends one request:
///
/// ```json
/// {
///   "model": "mistral-medium",
///   "messages": [
///     {"role": "system", "content": "You are a recipe expert. ..."},
///     {"role": "user", "content": "Give me some easy recipes using items related to: <prompt>"}
///   ],
///   "temperature": 0.7
/// }
/// ```
///
/// and returns `choices[0].message.content` unchanged. There is no retry and
/// no timeout beyond the HTTP client's defaults.
///
/// # Example
///
/// ```no_run
/// use cobudget_integrations::providers::{MistralClient, MistralConfig, RecipeProvider};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MistralClient::new(MistralConfig::new(std::env::var("MISTRAL_API_KEY")?))?;
/// let text = client.recipes("paneer and spinach").await?;
/// println!("{}", text);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider_trait::{ProviderError, ProviderResult, RecipeProvider};

pub const DEFAULT_API_URL: &str = "https://api.mistral.ai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistral-medium";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "You are a recipe expert. Provide simple, budget-friendly recipes using ingredients from the user's shopping list or preferences.";

/// Longest upstream error body kept in [`ProviderError::UpstreamStatus`]
const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct MistralConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
}

impl MistralConfig {
    /// Default endpoint and model with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatResponse {
    /// Text of the first choice
    pub fn into_content(self) -> ProviderResult<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("response has no choices".to_string()))
    }
}

/// Chat-completion client for recipe prompts
pub struct MistralClient {
    client: Client,
    config: MistralConfig,
}

impl MistralClient {
    pub fn new(config: MistralConfig) -> ProviderResult<Self> {
        Self::with_client(config, Client::builder().build()?)
    }

    pub fn with_client(config: MistralConfig, client: Client) -> ProviderResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured("MISTRAL_API_KEY is empty".to_string()));
        }

        Ok(Self { client, config })
    }

    /// Builds the request body for `prompt`
    pub fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::new("system", SYSTEM_PROMPT),
                ChatMessage::new(
                    "user",
                    format!("Give me some easy recipes using items related to: {}", prompt),
                ),
            ],
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl RecipeProvider for MistralClient {
    fn name(&self) -> &str {
        "mistral"
    }

    async fn recipes(&self, prompt: &str) -> ProviderResult<String> {
        if prompt.trim().is_empty() {
            return Err(ProviderError::InvalidInput("Prompt required".to_string()));
        }

        let body = self.build_request(prompt);
        debug!(model = %body.model, "Requesting recipes");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::UpstreamStatus {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed.into_content()
    }
}
