/// Occasion and diet based suggestions
///
/// Both recommenders match product tags exactly (ignoring case) against a
/// list of wanted tags. "Smart" suggestions derive that list from an occasion
/// keyword; nutrition suggestions take it straight from the caller.

use crate::models::product::Product;

/// Occasion keywords and the tags they pull in
pub const SMART_KEYWORDS: &[(&str, &[&str])] = &[
    ("biryani", &["rice", "spices", "chicken", "saffron", "yogurt"]),
    ("wedding", &["sweets", "decorations", "flowers", "snacks", "juice"]),
    ("keto", &["almonds", "avocados", "eggs", "cheese", "spinach"]),
    ("party", &["chips", "soda", "cake", "cups", "snacks"]),
];

/// Related tags for an occasion keyword; empty for unknown keywords
pub fn smart_tags(keyword: &str) -> &'static [&'static str] {
    let keyword = keyword.trim().to_lowercase();

    SMART_KEYWORDS
        .iter()
        .find(|(known, _)| *known == keyword)
        .map(|(_, tags)| *tags)
        .unwrap_or(&[])
}

/// In-stock products carrying at least one of `wanted`
pub fn match_tags<S: AsRef<str>>(products: &[Product], wanted: &[S]) -> Vec<Product> {
    if wanted.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|product| product.in_stock)
        .filter(|product| {
            wanted
                .iter()
                .any(|tag| product.tags.contains_ignore_case(tag.as_ref().trim()))
        })
        .cloned()
        .collect()
}

pub fn recommend_smart(products: &[Product], keyword: &str) -> Vec<Product> {
    match_tags(products, smart_tags(keyword))
}

pub fn recommend_nutrition<S: AsRef<str>>(products: &[Product], preferences: &[S]) -> Vec<Product> {
    match_tags(products, preferences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRepository, InMemoryCatalog};

    async fn catalog() -> Vec<Product> {
        InMemoryCatalog::seeded().list_all().await.unwrap()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_smart_tags_lookup() {
        assert_eq!(smart_tags("keto"), &["almonds", "avocados", "eggs", "cheese", "spinach"]);
        assert_eq!(smart_tags(" Party "), &["chips", "soda", "cake", "cups", "snacks"]);
        assert!(smart_tags("picnic").is_empty());
        assert!(smart_tags("").is_empty());
    }

    #[tokio::test]
    async fn test_biryani_suggestions() {
        let products = catalog().await;
        let found = recommend_smart(&products, "Biryani");

        assert_eq!(ids(&found), ["AR002", "MD001", "MF001"]);
    }

    #[tokio::test]
    async fn test_party_suggestions() {
        let products = catalog().await;
        let found = recommend_smart(&products, "party");

        assert_eq!(ids(&found), ["MU001", "MU002"]);
    }

    #[tokio::test]
    async fn test_unknown_keyword_suggests_nothing() {
        let products = catalog().await;
        assert!(recommend_smart(&products, "graduation").is_empty());
    }

    #[tokio::test]
    async fn test_nutrition_exact_tag_match() {
        let products = catalog().await;

        let found = recommend_nutrition(&products, &["Eggs", "almonds"]);
        assert_eq!(ids(&found), ["DB003", "MD002"]);

        // "dairy" is a tag but "dai" is not
        assert!(recommend_nutrition(&products, &["dai"]).is_empty());
    }

    #[tokio::test]
    async fn test_nutrition_skips_out_of_stock() {
        let mut products = catalog().await;
        for product in products.iter_mut().filter(|p| p.id == "DB003") {
            product.in_stock = false;
        }

        let found = recommend_nutrition(&products, &["eggs".to_string()]);
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_empty_preferences() {
        let products = catalog().await;
        let none: [&str; 0] = [];
        assert!(recommend_nutrition(&products, &none).is_empty());
    }
}
