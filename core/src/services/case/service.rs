//! Case read service

use std::sync::Arc;

use crate::domain::entities::case::{Case, CaseId, Task};
use crate::domain::entities::document::Document;
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CaseRepository, EvidenceRepository};
use crate::services::authorization::{Action, AuthorizationGate, DenyReason};

pub struct CaseService<C: CaseRepository, E: EvidenceRepository> {
    cases: Arc<C>,
    documents: Arc<E>,
    gate: Arc<AuthorizationGate>,
}

impl<C: CaseRepository, E: EvidenceRepository> CaseService<C, E> {
    pub fn new(cases: Arc<C>, documents: Arc<E>, gate: Arc<AuthorizationGate>) -> Self {
        Self {
            cases,
            documents,
            gate,
        }
    }

    /// Cases of the caller's firm; every case when the system bypass applies
    pub async fn list_cases(&self, claims: &Claims) -> DomainResult<Vec<Case>> {
        if self.gate.bypasses_firm_check(claims) {
            return self.cases.find_all().await;
        }
        let firm_id = claims
            .firm_id
            .ok_or_else(|| DomainError::forbidden(DenyReason::NoFirmAffiliation.as_str()))?;
        self.gate.require(claims, firm_id, Action::ListCases)?;
        self.cases.find_by_firm(firm_id).await
    }

    pub async fn tasks(&self, claims: &Claims, case_id: CaseId) -> DomainResult<Vec<Task>> {
        let case = self
            .gate
            .case_in_scope(self.cases.as_ref(), claims, case_id, Action::ReadTasks)
            .await?;
        self.cases.find_tasks(case.id).await
    }

    pub async fn documents(&self, claims: &Claims, case_id: CaseId) -> DomainResult<Vec<Document>> {
        let case = self
            .gate
            .case_in_scope(self.cases.as_ref(), claims, case_id, Action::ReadDocuments)
            .await?;
        self.documents.find_by_case(case.id).await
    }
}
