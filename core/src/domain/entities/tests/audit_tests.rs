//! Unit tests for audit log entity

use chrono::Utc;

use crate::domain::entities::audit::{AuditAction, AuditLog};
use crate::domain::entities::document::NewDocument;
use crate::domain::entities::user::Role;
use crate::domain::value_objects::{DurableArtifact, StorageKey};

#[test]
fn test_action_string_round_trip() {
    for action in [
        AuditAction::DocumentUpload,
        AuditAction::CredentialReset,
        AuditAction::RoleChange,
    ] {
        assert_eq!(AuditAction::from_str(action.as_str()), Some(action));
    }
    assert_eq!(AuditAction::from_str("DELETE_EVERYTHING"), None);
}

#[test]
fn test_document_upload_entry_references_document() {
    let key = StorageKey::generate(Some("scan.pdf"), Utc::now());
    let doc = NewDocument::new(9, 4, DurableArtifact::confirmed(key.clone(), 512), "/uploads/x");

    let entry = AuditLog::document_upload(&doc);

    assert_eq!(entry.action, AuditAction::DocumentUpload);
    assert_eq!(entry.case_id, Some(9));
    assert_eq!(entry.actor_id, 4);
    assert_eq!(entry.details["document_id"], doc.id.to_string());
    assert_eq!(entry.details["storage_key"], key.as_str());
    assert_eq!(entry.details["size"], 512);
}

#[test]
fn test_role_change_entry_has_no_case() {
    let entry = AuditLog::role_change(1, 2, Role::Staff, Role::Lawyer);

    assert_eq!(entry.case_id, None);
    assert_eq!(entry.details["target_user_id"], 2);
    assert_eq!(entry.details["from"], "staff");
    assert_eq!(entry.details["to"], "lawyer");
}
