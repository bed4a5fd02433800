//! # CoBudget Integrations
//!
//! Clients for the third-party services CoBudget calls out to.
//!
//! ## Modules
//!
//! - `providers`: recipe and image lookup providers, plus mocks

pub mod providers;
