//! Document persistence, always paired with its audit entry.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditLog;
use crate::domain::entities::case::CaseId;
use crate::domain::entities::document::{Document, NewDocument};
use crate::errors::DomainError;

/// Repository trait for evidence documents.
///
/// `record_upload` is the only way to create a document row.
#[async_trait]
pub trait EvidenceRepository: Send + Sync {
    /// Insert the document and its `DOCUMENT_UPLOAD` audit entry in one
    /// transaction. Either both rows become visible or neither does.
    ///
    /// # Returns
    /// * `Ok(Document)` - Both rows committed
    /// * `Err(DomainError::TransientStorage)` - Store unavailable, nothing written
    /// * `Err(DomainError::Integrity)` - Constraint failure, rolled back
    /// * `Err(DomainError::CommitUnknown)` - COMMIT sent, acknowledgement lost
    async fn record_upload(
        &self,
        document: NewDocument,
        audit: AuditLog,
    ) -> Result<Document, DomainError>;

    /// Documents attached to a case, oldest first
    async fn find_by_case(&self, case_id: CaseId) -> Result<Vec<Document>, DomainError>;
}
