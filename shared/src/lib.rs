//! Shared utilities and common types for the Nyaya server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error and response envelope structures
//! - Utility functions (email normalization and masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, AuthorizationConfig, ConfigError, DatabaseConfig, Environment,
    JwtConfig, LoggingConfig, PasswordConfig, SecretString, ServerConfig, StorageConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::ApiResponse;
pub use utils::validation;
