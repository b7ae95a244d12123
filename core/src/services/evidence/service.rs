//! Evidence intake coordinator

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::entities::audit::AuditLog;
use crate::domain::entities::case::CaseId;
use crate::domain::entities::document::{DocumentId, NewDocument};
use crate::domain::entities::token::Claims;
use crate::domain::value_objects::{PendingArtifact, StorageKey};
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::{ArtifactStore, CaseRepository, EvidenceRepository};
use crate::services::authorization::{Action, AuthorizationGate};

/// One upload as received from a client
#[derive(Debug, Clone)]
pub struct IntakeRequest {
    pub case_id: CaseId,
    /// Must be explicitly `true`
    pub declaration: bool,
    pub artifact: PendingArtifact,
}

/// What the client gets back after a committed intake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeReceipt {
    pub document_id: DocumentId,
    pub storage_key: StorageKey,
    pub location: String,
}

pub struct EvidenceIntakeService<C, E, S>
where
    C: CaseRepository,
    E: EvidenceRepository,
    S: ArtifactStore,
{
    cases: Arc<C>,
    evidence: Arc<E>,
    store: Arc<S>,
    gate: Arc<AuthorizationGate>,
    max_upload_bytes: usize,
}

impl<C, E, S> EvidenceIntakeService<C, E, S>
where
    C: CaseRepository,
    E: EvidenceRepository,
    S: ArtifactStore,
{
    pub fn new(
        cases: Arc<C>,
        evidence: Arc<E>,
        store: Arc<S>,
        gate: Arc<AuthorizationGate>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            cases,
            evidence,
            store,
            gate,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub async fn intake(&self, claims: &Claims, request: IntakeRequest) -> DomainResult<IntakeReceipt> {
        if !request.declaration {
            return Err(ValidationError::DeclarationRequired.into());
        }
        if request.artifact.is_empty() {
            return Err(ValidationError::required("file").into());
        }
        if request.artifact.bytes.len() > self.max_upload_bytes {
            return Err(ValidationError::PayloadTooLarge {
                limit: self.max_upload_bytes,
            }
            .into());
        }
        let actor_id = claims.user_id()?;

        let case = self
            .gate
            .case_in_scope(self.cases.as_ref(), claims, request.case_id, Action::UploadEvidence)
            .await?;

        let key = StorageKey::generate(request.artifact.original_filename.as_deref(), Utc::now());
        tracing::info!(case_id = case.id, actor_id, storage_key = %key, "Evidence intake started");

        let artifact = self.store.persist(&key, &request.artifact.bytes).await?;
        let location = self.store.location(&key);

        let document = NewDocument::new(case.id, actor_id, artifact, location);
        let audit = AuditLog::document_upload(&document);

        match self.evidence.record_upload(document, audit).await {
            Ok(recorded) => {
                tracing::info!(
                    case_id = case.id,
                    document_id = %recorded.id,
                    storage_key = %recorded.storage_key,
                    size_bytes = recorded.size_bytes,
                    "Evidence recorded"
                );
                Ok(IntakeReceipt {
                    document_id: recorded.id,
                    storage_key: recorded.storage_key,
                    location: recorded.location,
                })
            }
            Err(err) if !err.is_rolled_back() => {
                // the document row may be committed, so its artifact stays
                tracing::error!(case_id = case.id, storage_key = %key, error = %err, "Evidence commit unacknowledged, keeping artifact");
                Err(err)
            }
            Err(err) => {
                tracing::error!(case_id = case.id, storage_key = %key, error = %err, "Evidence transaction rolled back");
                if let Err(discard_err) = self.store.discard(&key).await {
                    tracing::warn!(storage_key = %key, error = %discard_err, "Orphaned artifact left in storage");
                }
                Err(err)
            }
        }
    }
}
