//! Specific error types for authentication, tokens and input validation
//!
//! The presentation layer maps these to stable status codes and messages;
//! the `Display` text here is for server-side logs only.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password. Both cases share this variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The stored password hash could not be parsed
    #[error("Stored credential is corrupt")]
    CorruptCredential,

    #[error("Missing bearer token")]
    MissingToken,
}

/// Token validation and issuance errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    /// The legal declaration flag was absent or not `true`
    #[error("Legal declaration required")]
    DeclarationRequired,

    #[error("Payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Unknown role: {role}")]
    UnknownRole { role: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        Self::RequiredField { field: field.into() }
    }

    pub fn invalid(field: impl Into<String>) -> Self {
        Self::InvalidFormat { field: field.into() }
    }
}
