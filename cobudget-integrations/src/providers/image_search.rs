/// Product image lookup by scraping search pages
///
/// Best-effort and tied to third-party markup. A lookup makes up to two
/// requests:
///
/// 1. An image search for `"{query} walmart"`. The page is scanned with each
///    of [`RESULT_PATTERNS`] in order; for each pattern the first three
///    matches are inspected and the first one longer than 50 characters wins.
/// 2. If that finds nothing, a store search for the first word of the query.
///    Embedded `"image"` / `"thumbnail"` JSON fields on the store's image CDN
///    are scanned and the first match is returned with `\/` unescaped.
///
/// A page that yields nothing is not an error; a failed request is.

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use super::provider_trait::{ImageLookup, ProviderError, ProviderResult};

pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";
pub const DEFAULT_STORE_SEARCH_URL: &str = "https://www.walmart.com/search";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// URL shapes accepted from image search results, in priority order
pub const RESULT_PATTERNS: &[&str] = &[
    r#"https://i5\.walmartimages\.com/[^"&]+"#,
    r#"https://i5\.wimg\.com/[^"&]+"#,
    r#"https://walmart\.com/[^"]*\.jpg"#,
    r#"https://walmart\.com/[^"]*\.jpeg"#,
    r#"https://walmart\.com/[^"]*\.png"#,
];

/// JSON fields in store search pages; group 1 is the URL
pub const EMBEDDED_PATTERNS: &[&str] = &[
    r#""image":\s*"(https://i5\.walmartimages\.com/[^"]+)""#,
    r#""thumbnail":\s*"(https://i5\.walmartimages\.com/[^"]+)""#,
];

/// Matches per pattern inspected on the results page
const CANDIDATES_PER_PATTERN: usize = 3;

/// Shorter URLs are usually icons or tracking pixels
const MIN_IMAGE_URL_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct ImageSearchConfig {
    pub search_url: String,
    pub store_search_url: String,
    pub user_agent: String,
    pub search_timeout: Duration,
    pub store_search_timeout: Duration,
}

impl Default for ImageSearchConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            store_search_url: DEFAULT_STORE_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_timeout: Duration::from_secs(10),
            store_search_timeout: Duration::from_secs(5),
        }
    }
}

/// Compiled scanners for both page kinds
#[derive(Debug, Clone)]
pub struct ImageScanner {
    result_patterns: Vec<Regex>,
    embedded_patterns: Vec<Regex>,
}

impl ImageScanner {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            result_patterns: compile(RESULT_PATTERNS)?,
            embedded_patterns: compile(EMBEDDED_PATTERNS)?,
        })
    }

    /// Picks an image URL from an image search results page
    pub fn from_results(&self, html: &str) -> Option<String> {
        self.result_patterns.iter().find_map(|pattern| {
            pattern
                .find_iter(html)
                .take(CANDIDATES_PER_PATTERN)
                .map(|m| m.as_str())
                .find(|url| url.chars().count() > MIN_IMAGE_URL_CHARS)
                .map(str::to_string)
        })
    }

    /// Picks an image URL from data embedded in a store search page
    pub fn from_store_page(&self, html: &str) -> Option<String> {
        self.embedded_patterns.iter().find_map(|pattern| {
            pattern
                .captures(html)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().replace("\\/", "/"))
        })
    }
}

fn compile(patterns: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p)).collect()
}

/// First whitespace-separated word of the query
pub fn first_word(query: &str) -> Option<&str> {
    query.split_whitespace().next()
}

pub struct ImageSearchClient {
    client: Client,
    config: ImageSearchConfig,
    scanner: ImageScanner,
}

impl ImageSearchClient {
    pub fn new(config: ImageSearchConfig) -> ProviderResult<Self> {
        let client = Client::builder().user_agent(config.user_agent.clone()).build()?;
        let scanner = ImageScanner::new()
            .map_err(|e| ProviderError::NotConfigured(format!("invalid image pattern: {}", e)))?;

        Ok(Self {
            client,
            config,
            scanner,
        })
    }

    async fn fetch(&self, url: &str, query: &[(&str, &str)], timeout: Duration) -> ProviderResult<String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await?;

        // Error pages are scanned like any other page.
        debug!(url, status = response.status().as_u16(), "Fetched search page");
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ImageLookup for ImageSearchClient {
    fn name(&self) -> &str {
        "image-search"
    }

    async fn find_image(&self, query: &str) -> ProviderResult<Option<String>> {
        let Some(word) = first_word(query) else {
            return Err(ProviderError::InvalidInput("Missing query".to_string()));
        };

        let search_terms = format!("{} walmart", query.trim());
        let html = self
            .fetch(
                &self.config.search_url,
                &[("q", search_terms.as_str()), ("tbm", "isch")],
                self.config.search_timeout,
            )
            .await?;

        if let Some(url) = self.scanner.from_results(&html) {
            debug!(query, image = %url, "Found image in search results");
            return Ok(Some(url));
        }

        let html = self
            .fetch(
                &self.config.store_search_url,
                &[("q", word)],
                self.config.store_search_timeout,
            )
            .await?;

        let found = self.scanner.from_store_page(&html);
        if let Some(url) = &found {
            debug!(query, image = %url, "Found image on store search page");
        }
        Ok(found)
    }
}
