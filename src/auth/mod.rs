//! Authentication module
//!
//! Token issuing against the configured mock account, token verification,
//! and the request extractor that guards task routes.

pub mod handlers;
mod middleware;
mod service;

pub use middleware::{bearer_token, AuthenticatedUser};
pub use service::{Claims, Credentials, TokenService, MAX_TOKEN_BYTES};
