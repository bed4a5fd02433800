/// Middleware modules for the API server
///
/// - Security headers on every response
/// - Caller identity resolution

pub mod identity;
pub mod security;
