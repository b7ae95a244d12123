//! User entity representing a registered member of a firm.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;

/// Opaque user identifier
pub type UserId = i64;

/// Tenant boundary identifier
pub type FirmId = i64;

/// Role carried by a user and by their session claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Firm administrator; may manage credentials of firm members
    Admin,
    Lawyer,
    Staff,
    /// Reserved system-level role. The only role allowed to have no firm.
    System,
}

impl Role {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Lawyer => "lawyer",
            Self::Staff => "staff",
            Self::System => "system",
        }
    }

    /// Whether the role may exist without a firm affiliation
    pub fn is_system_level(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "lawyer" => Ok(Self::Lawyer),
            "staff" => Ok(Self::Staff),
            "system" => Ok(Self::System),
            other => Err(ValidationError::UnknownRole { role: other.to_string() }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity as stored in the credential store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: UserId,

    /// Normalized (lowercase) email, unique across the store
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    /// Firm affiliation; `None` only for system-level roles
    pub firm_id: Option<FirmId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public projection safe to return to clients
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            firm_id: self.firm_id,
        }
    }
}

/// A user that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub firm_id: Option<FirmId>,
}

/// Client-facing view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub firm_id: Option<FirmId>,
}
