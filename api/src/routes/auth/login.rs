use actix_web::{web, HttpResponse};
use validator::Validate;

use nyaya_core::repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::state::AppState;

/// Handler for `POST /api/nyaya/login`
///
/// Unknown email and wrong password both answer `401 invalid credentials`.
pub async fn login<U, C, E, A, S>(
    state: web::Data<AppState<U, C, E, A, S>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CaseRepository + 'static,
    E: EvidenceRepository + 'static,
    A: AuditLogRepository + 'static,
    S: ArtifactStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(LoginResponse::from(outcome)),
        Err(e) => handle_domain_error(e),
    }
}
