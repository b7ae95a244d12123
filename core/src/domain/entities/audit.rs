//! Audit log entries for data- and security-relevant actions.
//!
//! Entries are immutable once written. They are only ever persisted inside
//! the transaction of the action they describe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use super::case::CaseId;
use super::document::NewDocument;
use super::user::{Role, UserId};

pub type AuditLogId = Uuid;

/// Audited action types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    DocumentUpload,
    CredentialReset,
    RoleChange,
}

impl AuditAction {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentUpload => "DOCUMENT_UPLOAD",
            Self::CredentialReset => "CREDENTIAL_RESET",
            Self::RoleChange => "ROLE_CHANGE",
        }
    }

    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "DOCUMENT_UPLOAD" => Some(Self::DocumentUpload),
            "CREDENTIAL_RESET" => Some(Self::CredentialReset),
            "ROLE_CHANGE" => Some(Self::RoleChange),
            _ => None,
        }
    }
}

/// Represents one audit log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLog {
    pub id: AuditLogId,

    /// Case the action affected; `None` for user administration
    pub case_id: Option<CaseId>,

    /// Authenticated user who performed the action
    pub actor_id: UserId,

    pub action: AuditAction,

    /// Structured action payload
    pub details: JsonValue,

    pub timestamp: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(action: AuditAction, actor_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            case_id: None,
            actor_id,
            action,
            details: JsonValue::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn for_case(mut self, case_id: CaseId) -> Self {
        self.case_id = Some(case_id);
        self
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = details;
        self
    }

    /// Entry paired with a document recorded by evidence intake
    pub fn document_upload(document: &NewDocument) -> Self {
        Self::new(AuditAction::DocumentUpload, document.uploaded_by)
            .for_case(document.case_id)
            .with_details(json!({
                "document_id": document.id.to_string(),
                "storage_key": document.storage_key().as_str(),
                "size": document.size_bytes(),
                "location": document.location,
            }))
    }

    pub fn credential_reset(actor_id: UserId, target_user_id: UserId) -> Self {
        Self::new(AuditAction::CredentialReset, actor_id)
            .with_details(json!({ "target_user_id": target_user_id }))
    }

    pub fn role_change(actor_id: UserId, target_user_id: UserId, from: Role, to: Role) -> Self {
        Self::new(AuditAction::RoleChange, actor_id).with_details(json!({
            "target_user_id": target_user_id,
            "from": from.as_str(),
            "to": to.as_str(),
        }))
    }
}
