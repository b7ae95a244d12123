//! Authorization gate deciding whether a session may act within a firm.
//!
//! A request scoped to firm F is allowed only when the caller's claims carry
//! firm F. The reserved `system` role skips the firm check, and only when
//! the deployment turns that on explicitly.

use nyaya_shared::AuthorizationConfig;

use crate::domain::entities::case::{Case, CaseId};
use crate::domain::entities::token::Claims;
use crate::domain::entities::user::{FirmId, Role};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::CaseRepository;

/// Operations that pass through the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListCases,
    ReadTasks,
    ReadDocuments,
    UploadEvidence,
    ReadAuditTrail,
    /// Credential resets and role changes
    ManageUsers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    CrossFirm,
    NoFirmAffiliation,
    InsufficientRole,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrossFirm => "cross-firm access",
            Self::NoFirmAffiliation => "no firm affiliation",
            Self::InsufficientRole => "insufficient role",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

pub struct AuthorizationGate {
    system_role_bypass: bool,
}

impl AuthorizationGate {
    pub fn new(config: &AuthorizationConfig) -> Self {
        Self {
            system_role_bypass: config.system_role_bypass,
        }
    }

    /// Whether `claims` hold the system role and the bypass is enabled
    pub fn bypasses_firm_check(&self, claims: &Claims) -> bool {
        self.system_role_bypass && claims.role == Role::System
    }

    pub fn authorize(&self, claims: &Claims, requested_firm_id: FirmId, action: Action) -> Decision {
        if action == Action::ManageUsers
            && claims.role != Role::Admin
            && !self.bypasses_firm_check(claims)
        {
            return Decision::Deny(DenyReason::InsufficientRole);
        }

        if self.bypasses_firm_check(claims) {
            return Decision::Allow;
        }

        match claims.firm_id {
            None => Decision::Deny(DenyReason::NoFirmAffiliation),
            Some(firm_id) if firm_id != requested_firm_id => Decision::Deny(DenyReason::CrossFirm),
            Some(_) => Decision::Allow,
        }
    }

    /// [`authorize`](Self::authorize), with a denial turned into an error
    pub fn require(&self, claims: &Claims, requested_firm_id: FirmId, action: Action) -> DomainResult<()> {
        match self.authorize(claims, requested_firm_id, action) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                tracing::warn!(
                    subject = %claims.sub,
                    requested_firm_id,
                    ?action,
                    reason = reason.as_str(),
                    "Authorization denied"
                );
                Err(DomainError::forbidden(reason.as_str()))
            }
        }
    }

    /// Load a case and check the caller may perform `action` on it.
    ///
    /// A missing case fails exactly like a case owned by another firm, so
    /// callers cannot probe for case ids outside their firm.
    pub async fn case_in_scope<C: CaseRepository + ?Sized>(
        &self,
        cases: &C,
        claims: &Claims,
        case_id: CaseId,
        action: Action,
    ) -> DomainResult<Case> {
        let case = match cases.find_by_id(case_id).await? {
            Some(case) => case,
            None => {
                tracing::warn!(subject = %claims.sub, case_id, ?action, "Case not found in scope");
                return Err(DomainError::forbidden(DenyReason::CrossFirm.as_str()));
            }
        };
        self.require(claims, case.firm_id, action)?;
        Ok(case)
    }
}
