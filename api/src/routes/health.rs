use actix_web::{web, HttpResponse};

use nyaya_core::repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};
use nyaya_shared::types::HealthResponse;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "nyaya-api";

/// `GET /health`: `200` when the datastore answers, `503` otherwise
pub async fn health_check<U, C, E, A, S>(state: web::Data<AppState<U, C, E, A, S>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CaseRepository + 'static,
    E: EvidenceRepository + 'static,
    A: AuditLogRepository + 'static,
    S: ArtifactStore + 'static,
{
    let database_ok = state.health.is_healthy().await;
    let body = HealthResponse::new(SERVICE_NAME, env!("CARGO_PKG_VERSION"), database_ok);

    if database_ok {
        HttpResponse::Ok().json(body)
    } else {
        log::warn!("Health check failed: database unreachable");
        HttpResponse::ServiceUnavailable().json(body)
    }
}
