//! Domain entities representing core business objects.

pub mod audit;
pub mod case;
pub mod document;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use audit::{AuditAction, AuditLog, AuditLogId};
pub use case::{Case, CaseId, Task, TaskId};
pub use document::{Document, DocumentId, DocumentState, NewDocument};
pub use token::{Claims, IssuedToken, SESSION_TOKEN_EXPIRY_HOURS};
pub use user::{FirmId, NewUser, Role, User, UserId, UserSummary};
