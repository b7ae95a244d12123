//! User repository trait defining the interface for the credential store.
//!
//! The credential store owns the user lifecycle: creation at registration,
//! then only audited credential resets and role changes. Users are never
//! deleted.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditLog;
use crate::domain::entities::user::{NewUser, Role, User, UserId};
use crate::errors::DomainError;

/// Repository trait for User persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user with its generated id
    /// * `Err(DomainError::Conflict)` - Email already registered
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Replace a user's password hash and append `audit` in the same
    /// transaction. `NotFound` if the user does not exist.
    async fn reset_password_hash(
        &self,
        id: UserId,
        password_hash: &str,
        audit: &AuditLog,
    ) -> Result<(), DomainError>;

    /// Change a user's role and append `audit` in the same transaction
    async fn update_role(&self, id: UserId, role: Role, audit: &AuditLog) -> Result<(), DomainError>;
}
