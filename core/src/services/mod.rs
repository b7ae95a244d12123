//! Business services containing domain logic and use cases.

pub mod audit;
pub mod auth;
pub mod authorization;
pub mod case;
pub mod evidence;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use audit::AuditTrailService;
pub use auth::{AuthService, RegisterRequest};
pub use authorization::{Action, AuthorizationGate, Decision, DenyReason};
pub use case::CaseService;
pub use evidence::{EvidenceIntakeService, IntakeReceipt, IntakeRequest};
pub use password::PasswordService;
pub use token::{TokenService, TokenServiceConfig};
