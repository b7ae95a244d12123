//! Repository interfaces for persistence, plus in-memory doubles for tests.
//!
//! Writes that must be audited take the [`AuditLog`](crate::domain::entities::AuditLog)
//! entry as an argument so the implementation can persist both in one
//! transaction. There is no standalone audit write.

pub mod audit;
pub mod case;
pub mod evidence;
pub mod storage;
pub mod user;

pub use audit::AuditLogRepository;
pub use case::CaseRepository;
pub use evidence::EvidenceRepository;
pub use storage::ArtifactStore;
pub use user::UserRepository;

#[cfg(any(test, feature = "test-support"))]
pub use audit::MockAuditLogRepository;
#[cfg(any(test, feature = "test-support"))]
pub use case::MockCaseRepository;
#[cfg(any(test, feature = "test-support"))]
pub use evidence::MockEvidenceRepository;
#[cfg(any(test, feature = "test-support"))]
pub use storage::MockArtifactStore;
#[cfg(any(test, feature = "test-support"))]
pub use user::MockUserRepository;
