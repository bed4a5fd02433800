/// Product recommendation
///
/// - [`scorer`]: keyword relevance ranking under a budget ceiling
/// - [`context`]: occasion keyword and dietary preference suggestions
///
/// Everything here is pure: callers load products through a
/// [`CatalogRepository`](crate::catalog::CatalogRepository) and pass them in.

pub mod context;
pub mod scorer;

pub use context::{recommend_nutrition, recommend_smart, smart_tags};
pub use scorer::{recommend, RecommendQuery, ScoredProduct, MAX_RESULTS};
