//! Firm-scoped case, task and document listings

use actix_web::{web, HttpResponse};

use nyaya_core::domain::entities::case::CaseId;
use nyaya_core::repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};

use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// `GET /api/nyaya/cases`: cases of the caller's firm
pub async fn list_cases<U, C, E, A, S>(
    auth: AuthContext,
    state: web::Data<AppState<U, C, E, A, S>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CaseRepository + 'static,
    E: EvidenceRepository + 'static,
    A: AuditLogRepository + 'static,
    S: ArtifactStore + 'static,
{
    match state.case_service.list_cases(&auth.claims).await {
        Ok(cases) => HttpResponse::Ok().json(cases),
        Err(e) => handle_domain_error(e),
    }
}

/// `GET /api/nyaya/tasks/{case_id}`
pub async fn list_tasks<U, C, E, A, S>(
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
    match state.case_service.tasks(&auth.claims, case_id.into_inner()).await {
        Ok(tasks) => HttpResponse::Ok().json(tasks),
        Err(e) => handle_domain_error(e),
    }
}

/// `GET /api/nyaya/documents/{case_id}`
pub async fn list_documents<U, C, E, A, S>(
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
        .case_service
        .documents(&auth.claims, case_id.into_inner())
        .await
    {
        Ok(documents) => HttpResponse::Ok().json(documents),
        Err(e) => handle_domain_error(e),
    }
}
