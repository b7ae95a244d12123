//! Session token issuance and validation (HS256 JWT).
//!
//! Tokens are stateless: nothing is persisted and there is no refresh
//! path. Re-login is the only way to renew a session.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
