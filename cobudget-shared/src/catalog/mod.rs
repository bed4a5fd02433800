/// Product catalog: repository trait, implementations and seed data

pub mod repository;
pub mod seed;

pub use repository::{CatalogError, CatalogRepository, CatalogResult, InMemoryCatalog, PgCatalog};
pub use seed::{SeedProduct, SEED_PRODUCTS};
