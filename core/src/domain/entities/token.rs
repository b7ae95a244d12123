//! Session token claims.
//!
//! Tokens are never persisted; the claim set is self-contained and the
//! expiry is the only invalidation mechanism.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::user::{FirmId, Role, UserId};
use crate::errors::TokenError;

/// Session token lifetime (12 hours)
pub const SESSION_TOKEN_EXPIRY_HOURS: i64 = 12;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub role: Role,

    /// Firm scope of the subject
    pub firm_id: Option<FirmId>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates claims for a session token issued at `issued_at`
    pub fn new(
        user_id: UserId,
        role: Role,
        firm_id: Option<FirmId>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            role,
            firm_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            iss: issuer.into(),
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }

    /// Absolute expiry instant
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}

/// A freshly minted session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
