//! Result of a successful login.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::IssuedToken;
use crate::domain::entities::user::UserSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub session: IssuedToken,
    pub user: UserSummary,
}
