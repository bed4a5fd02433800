/// API route handlers
///
/// Organized by resource:
///
/// - `index`: Landing page
/// - `health`: Health check endpoint
/// - `products`: Catalog listing
/// - `recommend`: Keyword, occasion and nutrition recommendations
/// - `cart`: Personal cart
/// - `budget`: Monthly budgets
/// - `shared_cart`: Shared cart sessions
/// - `recipe`: Recipe suggestions
/// - `image`: Product image lookup
/// - `admin`: Database bootstrap

pub mod admin;
pub mod budget;
pub mod cart;
pub mod health;
pub mod image;
pub mod index;
pub mod products;
pub mod recipe;
pub mod recommend;
pub mod shared_cart;
