//! Request bodies for the firm administration endpoints

use serde::Deserialize;
use validator::Validate;

/// Request body for `POST /api/nyaya/admin/users/{user_id}/password`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Request body for `PUT /api/nyaya/admin/users/{user_id}/role`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    #[validate(length(min = 1, max = 32, message = "Role is required"))]
    pub role: String,
}
