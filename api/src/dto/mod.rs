pub mod admin;
pub mod auth;
pub mod evidence;

pub use admin::{ChangeRoleRequest, ResetPasswordRequest};
pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use evidence::UploadResponse;
