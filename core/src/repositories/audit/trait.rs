//! Read side of the audit log.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditLog;
use crate::domain::entities::case::CaseId;
use crate::errors::DomainError;

/// Read-only access to the audit log.
///
/// Entries are written exclusively by the repository that performs the
/// audited action, inside that action's transaction. This trait therefore
/// exposes no write methods.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// All entries for a case, oldest first
    async fn find_by_case(&self, case_id: CaseId) -> Result<Vec<AuditLog>, DomainError>;
}
