/// Database models for CoBudget
///
/// Each module owns one table (or a parent/child pair) and its queries.
///
/// # Models
///
/// - `user`: shoppers, keyed by their external auth id
/// - `product`: the catalog
/// - `budget`: one spending budget per user per month
/// - `cart_item`: personal cart lines
/// - `shared_cart`: share-code carts and their lines
/// - `recommendation_log`: write-only search audit trail

pub mod budget;
pub mod cart_item;
pub mod product;
pub mod recommendation_log;
pub mod shared_cart;
pub mod user;
