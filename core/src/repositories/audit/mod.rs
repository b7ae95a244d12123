//! Audit log repository module.

mod r#trait;
pub use r#trait::AuditLogRepository;

#[cfg(any(test, feature = "test-support"))]
pub(crate) mod mock;
#[cfg(any(test, feature = "test-support"))]
pub use mock::MockAuditLogRepository;
