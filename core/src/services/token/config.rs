//! Configuration for the token service

use nyaya_shared::JwtConfig;

use crate::domain::entities::token::SESSION_TOKEN_EXPIRY_HOURS;

/// Configuration for the token service
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub jwt_secret: String,
    /// Value of the `iss` claim, required on validation
    pub issuer: String,
    /// Session lifetime in hours
    pub expiry_hours: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            issuer: "nyaya".to_string(),
            expiry_hours: SESSION_TOKEN_EXPIRY_HOURS,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.expose().to_string(),
            issuer: config.issuer.clone(),
            expiry_hours: config.expiry_hours,
        }
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("expiry_hours", &self.expiry_hours)
            .finish()
    }
}
