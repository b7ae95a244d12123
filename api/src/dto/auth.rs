//! Request and response bodies for registration and login

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use nyaya_core::domain::entities::user::{FirmId, UserSummary};
use nyaya_core::domain::value_objects::LoginOutcome;

/// Request body for `POST /api/nyaya/register`
///
/// Email syntax and password byte length are checked by the auth service
/// after normalization; this only rejects obviously empty input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, max = 32, message = "Role is required"))]
    pub role: String,

    pub firm_id: Option<FirmId>,
}

/// Request body for `POST /api/nyaya/login`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserSummary,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.session.token,
            expires_at: outcome.session.expires_at,
            user: outcome.user,
        }
    }
}
