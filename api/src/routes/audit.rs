use actix_web::{web, HttpResponse};

use nyaya_core::domain::entities::case::CaseId;
use nyaya_core::repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};

use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// `GET /api/nyaya/audit/{case_id}`: the case's audit trail, oldest first
pub async fn case_audit_trail<U, C, E, A, S>(
    auth: AuthContext,
    state: web::Data<AppState<U, C, E, A, S>>,
    case_id: web::Path<CaseId>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CaseRepository + 'static,
    E: EvidenceRepository + 'static,
    A: AuditLogRepository + 'static,
    S: ArtifactStore + 'static,
{
    match state
        .audit_service
        .entries_for_case(&auth.claims, case_id.into_inner())
        .await
    {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => handle_domain_error(e),
    }
}
