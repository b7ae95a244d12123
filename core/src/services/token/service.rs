//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::domain::entities::user::{FirmId, Role, UserId};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and validates signed session tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a session token valid from now for the configured lifetime
    pub fn issue(
        &self,
        user_id: UserId,
        role: Role,
        firm_id: Option<FirmId>,
    ) -> Result<IssuedToken, DomainError> {
        self.issue_at(user_id, role, firm_id, Utc::now())
    }

    /// Issue a token as if at `issued_at`
    pub fn issue_at(
        &self,
        user_id: UserId,
        role: Role,
        firm_id: Option<FirmId>,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        let claims = Claims::new(
            user_id,
            role,
            firm_id,
            issued_at,
            Duration::hours(self.config.expiry_hours),
            self.config.issuer.clone(),
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Validate a token and return its claims. Pure: no I/O, no state.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;
        let claims = data.claims;

        // subject must be a user id, not just any string
        claims.user_id()?;
        Ok(claims)
    }

    /// Configured session lifetime in hours
    pub fn expiry_hours(&self) -> i64 {
        self.config.expiry_hours
    }
}
