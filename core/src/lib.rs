//! # Nyaya Core
//!
//! Domain layer for the Nyaya case-management backend: entities, the error
//! taxonomy, repository and artifact-store interfaces, and the services that
//! implement authentication, firm-scoped authorization and evidence intake.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AuditAction, AuditLog, Case, CaseId, Claims, Document, DocumentId, FirmId, Role, Task, User,
    UserId, UserSummary,
};
pub use domain::value_objects::{DurableArtifact, LoginOutcome, PendingArtifact, StorageKey};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};
pub use services::{
    AuditTrailService, AuthService, AuthorizationGate, CaseService, EvidenceIntakeService,
    PasswordService, TokenService,
};

#[cfg(test)]
mod tests {
    use crate::{DomainError, Role, StorageKey};

    #[test]
    fn test_root_reexports_resolve() {
        let err: DomainError = crate::ValidationError::DeclarationRequired.into();
        assert!(err.is_rolled_back());
        assert_eq!("lawyer".parse::<Role>().ok(), Some(Role::Lawyer));
        assert!(StorageKey::parse("not a key").is_err());
    }
}
