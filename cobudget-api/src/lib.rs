//! # CoBudget API Server Library
//!
//! HTTP surface of the CoBudget shopping assistant: catalog browsing,
//! budget-aware recommendations, personal and shared carts, recipe
//! suggestions and product image lookup.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Extractors whose rejections use the JSON error body
//! - `middleware`: Security headers and caller identity
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
