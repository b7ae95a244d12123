use actix_web::{web, HttpResponse};
use validator::Validate;

use nyaya_core::domain::entities::user::Role;
use nyaya_core::repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};
use nyaya_core::services::RegisterRequest as NewAccount;
use nyaya_shared::ApiResponse;

use crate::dto::auth::RegisterRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::state::AppState;

/// Handler for `POST /api/nyaya/register`
///
/// Creates a firm member account and answers `201 Created` with the
/// account summary. A taken email is `409`; the `system` role and a
/// missing `firm_id` are `400`.
pub async fn register<U, C, E, A, S>(
    state: web::Data<AppState<U, C, E, A, S>>,
    request: web::Json<RegisterRequest>,
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
    let request = request.into_inner();

    let role = match request.role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => return handle_domain_error(e.into()),
    };

    let account = NewAccount {
        email: request.email,
        password: request.password,
        role,
        firm_id: request.firm_id,
    };

    match state.auth_service.register(account).await {
        Ok(user) => HttpResponse::Created()
            .json(ApiResponse::success(user).with_message("User registered successfully")),
        Err(e) => handle_domain_error(e),
    }
}
