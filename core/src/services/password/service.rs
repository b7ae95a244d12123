//! bcrypt-backed password verifier
//!
//! Hashing is CPU bound, so every call runs on tokio's blocking pool.

use std::sync::Arc;

use nyaya_shared::PasswordConfig;

use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};

/// bcrypt only looks at the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

const DUMMY_PASSWORD: &str = "nyaya-timing-equalizer";

pub struct PasswordService {
    cost: u32,
    /// Hash at the configured cost, verified against when the user is unknown
    dummy_hash: Arc<str>,
}

impl PasswordService {
    pub fn new(config: &PasswordConfig) -> DomainResult<Self> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, config.bcrypt_cost)
            .map_err(|e| DomainError::internal(format!("bcrypt setup failed: {}", e)))?;
        Ok(Self {
            cost: config.bcrypt_cost,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Reject passwords bcrypt cannot represent faithfully
    pub fn check_policy(plaintext: &str) -> Result<(), ValidationError> {
        if plaintext.is_empty() {
            return Err(ValidationError::required("password"));
        }
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(ValidationError::invalid("password"));
        }
        Ok(())
    }

    /// Salted hash of `plaintext`
    pub async fn hash(&self, plaintext: &str) -> DomainResult<String> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::internal(format!("hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("bcrypt hash failed: {}", e)))
    }

    /// `Ok(false)` on mismatch; `CorruptCredential` only if `hash` is not a
    /// bcrypt hash
    pub async fn verify(&self, plaintext: &str, hash: &str) -> DomainResult<bool> {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("verification task failed: {}", e)))?
            .map_err(|_| DomainError::Authentication(AuthError::CorruptCredential))
    }

    /// Spend one verification's worth of work and discard the result
    pub async fn verify_dummy(&self, plaintext: &str) {
        let plaintext = plaintext.to_owned();
        let hash = Arc::clone(&self.dummy_hash);
        let _ = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await;
    }
}
