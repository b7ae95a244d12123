//! Read path over the append-only audit log.

use std::sync::Arc;

use crate::domain::entities::audit::AuditLog;
use crate::domain::entities::case::CaseId;
use crate::domain::entities::token::Claims;
use crate::errors::DomainResult;
use crate::repositories::{AuditLogRepository, CaseRepository};
use crate::services::authorization::{Action, AuthorizationGate};

/// Service exposing audit entries for a case
pub struct AuditTrailService<C: CaseRepository, A: AuditLogRepository> {
    cases: Arc<C>,
    audit: Arc<A>,
    gate: Arc<AuthorizationGate>,
}

impl<C: CaseRepository, A: AuditLogRepository> AuditTrailService<C, A> {
    pub fn new(cases: Arc<C>, audit: Arc<A>, gate: Arc<AuthorizationGate>) -> Self {
        Self { cases, audit, gate }
    }

    /// Entries for a case in the caller's firm, oldest first
    pub async fn entries_for_case(&self, claims: &Claims, case_id: CaseId) -> DomainResult<Vec<AuditLog>> {
        let case = self
            .gate
            .case_in_scope(self.cases.as_ref(), claims, case_id, Action::ReadAuditTrail)
            .await?;
        self.audit.find_by_case(case.id).await
    }
}
