//! Unit tests for evidence intake

use chrono::{Duration, Utc};
use std::sync::Arc;

use nyaya_shared::AuthorizationConfig;

use crate::domain::entities::audit::AuditAction;
use crate::domain::entities::token::Claims;
use crate::domain::entities::user::Role;
use crate::domain::value_objects::PendingArtifact;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::{
    MockArtifactStore, MockAuditLogRepository, MockCaseRepository, MockEvidenceRepository,
};
use crate::services::audit::AuditTrailService;
use crate::services::authorization::AuthorizationGate;
use crate::services::evidence::{EvidenceIntakeService, IntakeRequest};

const LIMIT: usize = 1024;

struct Fixture {
    service: EvidenceIntakeService<MockCaseRepository, MockEvidenceRepository, MockArtifactStore>,
    trail: AuditTrailService<MockCaseRepository, MockAuditLogRepository>,
    evidence: MockEvidenceRepository,
    audit: MockAuditLogRepository,
    store: MockArtifactStore,
}

fn fixture() -> Fixture {
    let cases = MockCaseRepository::new();
    cases.add_case(1, 1, "Estate of Rao");
    cases.add_case(2, 2, "Another firm's case");
    let audit = MockAuditLogRepository::new();
    let evidence = MockEvidenceRepository::new(&audit);
    let store = MockArtifactStore::new();
    let gate = Arc::new(AuthorizationGate::new(&AuthorizationConfig::default()));
    let cases = Arc::new(cases);

    Fixture {
        service: EvidenceIntakeService::new(
            Arc::clone(&cases),
            Arc::new(evidence.clone()),
            Arc::new(store.clone()),
            Arc::clone(&gate),
            LIMIT,
        ),
        trail: AuditTrailService::new(cases, Arc::new(audit.clone()), gate),
        evidence,
        audit,
        store,
    }
}

fn lawyer() -> Claims {
    Claims::new(7, Role::Lawyer, Some(1), Utc::now(), Duration::hours(12), "nyaya")
}

fn upload(case_id: i64, declaration: bool) -> IntakeRequest {
    IntakeRequest {
        case_id,
        declaration,
        artifact: PendingArtifact::new(Some("photo.JPG".to_string()), vec![1, 2, 3, 4]),
    }
}

#[tokio::test]
async fn test_declaration_false_touches_nothing() {
    let f = fixture();

    let err = f.service.intake(&lawyer(), upload(1, false)).await.unwrap_err();

    assert_eq!(err, DomainError::Validation(ValidationError::DeclarationRequired));
    assert_eq!(f.store.persist_calls(), 0);
    assert!(f.evidence.get_all_documents().is_empty());
    assert!(f.audit.get_all_logs().is_empty());
}

#[tokio::test]
async fn test_declaration_is_checked_before_case_scope() {
    let f = fixture();

    let err = f.service.intake(&lawyer(), upload(2, false)).await.unwrap_err();

    assert_eq!(err, DomainError::Validation(ValidationError::DeclarationRequired));
}

#[tokio::test]
async fn test_successful_intake_writes_one_paired_record() {
    let f = fixture();

    let receipt = f.service.intake(&lawyer(), upload(1, true)).await.unwrap();

    let documents = f.evidence.get_all_documents();
    let logs = f.audit.get_all_logs();
    assert_eq!(documents.len(), 1);
    assert_eq!(logs.len(), 1);

    let doc = &documents[0];
    assert_eq!(doc.id, receipt.document_id);
    assert!(!doc.is_verified);
    assert_eq!(doc.case_id, 1);
    assert_eq!(doc.uploaded_by, 7);
    assert_eq!(doc.size_bytes, 4);
    assert_eq!(receipt.storage_key.extension(), Some("jpg"));
    assert_eq!(receipt.location, format!("/uploads/{}", receipt.storage_key));

    let entry = &logs[0];
    assert_eq!(entry.action, AuditAction::DocumentUpload);
    assert_eq!(entry.case_id, Some(1));
    assert_eq!(entry.actor_id, 7);
    assert_eq!(entry.details["document_id"], receipt.document_id.to_string());
    assert_eq!(entry.details["storage_key"], receipt.storage_key.as_str());
    assert_eq!(entry.details["size"], 4);

    assert_eq!(f.store.get(&receipt.storage_key), Some(vec![1, 2, 3, 4]));
}

#[tokio::test]
async fn test_cross_firm_case_is_forbidden_before_any_write() {
    let f = fixture();

    let foreign = f.service.intake(&lawyer(), upload(2, true)).await.unwrap_err();
    let missing = f.service.intake(&lawyer(), upload(404, true)).await.unwrap_err();

    assert!(matches!(foreign, DomainError::Authorization { .. }));
    assert_eq!(foreign, missing);
    assert_eq!(f.store.persist_calls(), 0);
}

#[tokio::test]
async fn test_failed_transaction_leaves_no_rows_and_discards_artifact() {
    let f = fixture();
    f.evidence.fail_transactions_with(DomainError::Integrity {
        message: "commit failed".to_string(),
    });

    let err = f.service.intake(&lawyer(), upload(1, true)).await.unwrap_err();

    assert!(matches!(err, DomainError::Integrity { .. }));
    assert_eq!(f.store.persist_calls(), 1);
    assert!(f.store.keys().is_empty());
    assert!(f.evidence.get_all_documents().is_empty());
    assert!(f.audit.get_all_logs().is_empty());
}

#[tokio::test]
async fn test_unacknowledged_commit_keeps_artifact_for_committed_document() {
    let f = fixture();
    f.evidence.commit_then_fail_with(DomainError::CommitUnknown {
        message: "document commit failed: connection reset".to_string(),
    });

    let err = f.service.intake(&lawyer(), upload(1, true)).await.unwrap_err();

    assert!(matches!(err, DomainError::CommitUnknown { .. }));
    let documents = f.evidence.get_all_documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(f.audit.get_all_logs().len(), 1);
    assert_eq!(f.store.get(&documents[0].storage_key), Some(vec![1, 2, 3, 4]));
}

#[tokio::test]
async fn test_failed_discard_still_reports_original_error() {
    let f = fixture();
    f.evidence.fail_transactions_with(DomainError::TransientStorage {
        message: "pool timed out".to_string(),
    });
    f.store.set_fail_discard(true);

    let err = f.service.intake(&lawyer(), upload(1, true)).await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(f.store.keys().len(), 1);
    assert!(f.evidence.get_all_documents().is_empty());
}

#[tokio::test]
async fn test_store_failure_skips_transaction() {
    let f = fixture();
    f.store.set_fail_persist(true);

    let err = f.service.intake(&lawyer(), upload(1, true)).await.unwrap_err();

    assert!(matches!(err, DomainError::TransientStorage { .. }));
    assert!(f.evidence.get_all_documents().is_empty());
    assert!(f.audit.get_all_logs().is_empty());
}

#[tokio::test]
async fn test_oversized_and_empty_uploads_are_rejected() {
    let f = fixture();
    let mut big = upload(1, true);
    big.artifact.bytes = vec![0; LIMIT + 1];
    let mut empty = upload(1, true);
    empty.artifact.bytes.clear();

    assert_eq!(
        f.service.intake(&lawyer(), big).await.unwrap_err(),
        DomainError::Validation(ValidationError::PayloadTooLarge { limit: LIMIT })
    );
    assert_eq!(
        f.service.intake(&lawyer(), empty).await.unwrap_err(),
        DomainError::Validation(ValidationError::required("file"))
    );
    assert_eq!(f.store.persist_calls(), 0);
}

#[tokio::test]
async fn test_replayed_upload_creates_independent_pairs() {
    let f = fixture();

    let first = f.service.intake(&lawyer(), upload(1, true)).await.unwrap();
    let second = f.service.intake(&lawyer(), upload(1, true)).await.unwrap();

    assert_ne!(first.document_id, second.document_id);
    assert_ne!(first.storage_key, second.storage_key);
    assert_eq!(f.evidence.get_all_documents().len(), 2);
    assert_eq!(f.audit.get_all_logs().len(), 2);
}

#[tokio::test]
async fn test_audit_trail_shows_intake_to_same_firm_only() {
    let f = fixture();
    f.service.intake(&lawyer(), upload(1, true)).await.unwrap();

    let entries = f.trail.entries_for_case(&lawyer(), 1).await.unwrap();
    assert_eq!(entries.len(), 1);

    let outsider = Claims::new(8, Role::Admin, Some(2), Utc::now(), Duration::hours(12), "nyaya");
    assert!(matches!(
        f.trail.entries_for_case(&outsider, 1).await,
        Err(DomainError::Authorization { .. })
    ));
}
