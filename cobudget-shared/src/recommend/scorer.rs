/// Keyword recommendation scorer
///
/// Scores each in-stock product against a free-text prompt:
///
/// ```text
/// text  = lower(name + " " + category + " " + tags.join(" "))
/// score = 10                       if the whole prompt occurs in text
///       + per token (len > 2):  5  if it occurs in the name
///                          else 3  if it occurs in the category
///                          else 2  if it occurs in any tag
/// ```
///
/// Products above a positive budget or scoring zero are dropped; the rest are
/// ordered by score (high first), then price (low first), and cut to
/// [`MAX_RESULTS`].
///
/// # Example
///
/// ```
/// use cobudget_shared::catalog::{CatalogRepository, InMemoryCatalog};
/// use cobudget_shared::recommend::scorer::{recommend, RecommendQuery};
/// use rust_decimal::Decimal;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = InMemoryCatalog::seeded();
/// let products = catalog.list_in_stock().await?;
///
/// let query = RecommendQuery::new("Fresh Milk", Decimal::from(100));
/// let ranked = recommend(&products, &query);
/// assert_eq!(ranked[0].product.name, "Amul Fresh Milk");
/// # Ok(())
/// # }
/// ```

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::product::Product;

/// Longest result list returned
pub const MAX_RESULTS: usize = 12;

/// Awarded when the full prompt occurs in the product text
pub const PHRASE_SCORE: u32 = 10;

pub const NAME_SCORE: u32 = 5;
pub const CATEGORY_SCORE: u32 = 3;
pub const TAG_SCORE: u32 = 2;

/// Tokens must be longer than this many characters
const MIN_TOKEN_CHARS: usize = 2;

/// A normalized recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendQuery {
    /// Lower-cased, trimmed prompt
    pub prompt: String,

    /// Price ceiling; zero or negative means no ceiling
    pub budget: Decimal,
}

impl RecommendQuery {
    pub fn new(prompt: &str, budget: Decimal) -> Self {
        Self {
            prompt: prompt.trim().to_lowercase(),
            budget,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prompt.is_empty()
    }

    /// Prompt words long enough to score on their own
    pub fn tokens(&self) -> Vec<&str> {
        tokenize(&self.prompt)
    }

    fn within_budget(&self, price: Decimal) -> bool {
        self.budget <= Decimal::ZERO || price <= self.budget
    }
}

/// A product with its match score
#[derive(Debug, Clone, Serialize)]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: Product,

    #[serde(rename = "match_score")]
    pub score: u32,
}

/// Splits on whitespace and keeps words longer than two characters
pub fn tokenize(prompt: &str) -> Vec<&str> {
    prompt
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}

/// Scores one product; `tokens` must come from the same (lower-cased) prompt
pub fn score_product(prompt: &str, tokens: &[&str], product: &Product) -> u32 {
    let name = product.name.to_lowercase();
    let category = product.category.to_lowercase();
    let tags: Vec<String> = product.tags.iter().map(|t| t.to_lowercase()).collect();
    let text = format!("{} {} {}", name, category, tags.join(" "));

    let mut score = 0;

    if text.contains(prompt) {
        score += PHRASE_SCORE;
    }

    for token in tokens {
        if name.contains(token) {
            score += NAME_SCORE;
        } else if category.contains(token) {
            score += CATEGORY_SCORE;
        } else if tags.iter().any(|tag| tag.contains(token)) {
            score += TAG_SCORE;
        }
    }

    score
}

/// Ranks `products` for `query`
///
/// Out-of-stock products are skipped here as well, so callers may pass the
/// full catalog.
pub fn recommend(products: &[Product], query: &RecommendQuery) -> Vec<ScoredProduct> {
    if query.is_empty() {
        return Vec::new();
    }

    let tokens = query.tokens();

    let mut ranked: Vec<ScoredProduct> = products
        .iter()
        .filter(|product| product.in_stock && query.within_budget(product.price))
        .filter_map(|product| {
            let score = score_product(&query.prompt, &tokens, product);
            (score > 0).then(|| ScoredProduct {
                product: product.clone(),
                score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.product.price.cmp(&b.product.price))
    });
    ranked.truncate(MAX_RESULTS);
    ranked
}
