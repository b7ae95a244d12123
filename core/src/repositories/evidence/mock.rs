//! Mock implementation of EvidenceRepository for testing

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::audit::{AuditAction, AuditLog};
use crate::domain::entities::case::CaseId;
use crate::domain::entities::document::{Document, NewDocument};
use crate::errors::DomainError;
use crate::repositories::audit::mock::SharedAuditLog;
use crate::repositories::audit::MockAuditLogRepository;

use super::EvidenceRepository;

/// Simulates the paired insert. A failed transaction leaves neither row.
#[derive(Clone)]
pub struct MockEvidenceRepository {
    documents: Arc<Mutex<Vec<Document>>>,
    audit: SharedAuditLog,
    failure: Arc<Mutex<Option<DomainError>>>,
    lost_ack: Arc<Mutex<Option<DomainError>>>,
}

impl MockEvidenceRepository {
    pub fn new(audit: &MockAuditLogRepository) -> Self {
        Self {
            documents: Arc::new(Mutex::new(Vec::new())),
            audit: audit.shared(),
            failure: Arc::new(Mutex::new(None)),
            lost_ack: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every following transaction fail with `error`
    pub fn fail_transactions_with(&self, error: DomainError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Commit both rows, then report `error` as if the acknowledgement was lost
    pub fn commit_then_fail_with(&self, error: DomainError) {
        *self.lost_ack.lock().unwrap() = Some(error);
    }

    pub fn get_all_documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvidenceRepository for MockEvidenceRepository {
    async fn record_upload(
        &self,
        document: NewDocument,
        audit: AuditLog,
    ) -> Result<Document, DomainError> {
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }

        if audit.action != AuditAction::DocumentUpload || audit.case_id != Some(document.case_id) {
            return Err(DomainError::Integrity {
                message: "audit entry does not describe this document".to_string(),
            });
        }

        let stored = document.into_document();
        {
            let mut documents = self.documents.lock().unwrap();
            let mut logs = self.audit.lock().unwrap();
            documents.push(stored.clone());
            logs.push(audit);
        }

        match self.lost_ack.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(stored),
        }
    }

    async fn find_by_case(&self, case_id: CaseId) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.lock().unwrap();
        Ok(documents.iter().filter(|d| d.case_id == case_id).cloned().collect())
    }
}
