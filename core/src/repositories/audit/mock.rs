//! In-memory audit log shared by the other mock repositories.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::audit::AuditLog;
use crate::domain::entities::case::CaseId;
use crate::errors::DomainError;

use super::AuditLogRepository;

pub(crate) type SharedAuditLog = Arc<Mutex<Vec<AuditLog>>>;

/// Mock implementation of AuditLogRepository for testing
#[derive(Clone, Default)]
pub struct MockAuditLogRepository {
    logs: SharedAuditLog,
}

impl MockAuditLogRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all stored logs for testing
    pub fn get_all_logs(&self) -> Vec<AuditLog> {
        self.logs.lock().unwrap().clone()
    }

    /// Handle other mocks append to inside their simulated transactions
    pub(crate) fn shared(&self) -> SharedAuditLog {
        Arc::clone(&self.logs)
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn find_by_case(&self, case_id: CaseId) -> Result<Vec<AuditLog>, DomainError> {
        let mut entries: Vec<AuditLog> = self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|log| log.case_id == Some(case_id))
            .cloned()
            .collect();
        entries.sort_by_key(|log| log.timestamp);
        Ok(entries)
    }
}
