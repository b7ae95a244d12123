//! Firm administration: explicit, audited credential repair and role changes

use actix_web::{web, HttpResponse};
use validator::Validate;

use nyaya_core::domain::entities::user::{Role, UserId};
use nyaya_core::repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};
use nyaya_shared::ApiResponse;

use crate::dto::admin::{ChangeRoleRequest, ResetPasswordRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// `POST /api/nyaya/admin/users/{user_id}/password`
///
/// Answers `204 No Content`. Users outside the caller's firm are `403`,
/// whether or not they exist.
pub async fn reset_password<U, C, E, A, S>(
    auth: AuthContext,
    state: web::Data<AppState<U, C, E, A, S>>,
    user_id: web::Path<UserId>,
    request: web::Json<ResetPasswordRequest>,
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
        .reset_password(&auth.claims, user_id.into_inner(), &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => handle_domain_error(e),
    }
}

/// `PUT /api/nyaya/admin/users/{user_id}/role`
pub async fn change_role<U, C, E, A, S>(
    auth: AuthContext,
    state: web::Data<AppState<U, C, E, A, S>>,
    user_id: web::Path<UserId>,
    request: web::Json<ChangeRoleRequest>,
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
    let role = match request.role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => return handle_domain_error(e.into()),
    };

    match state
        .auth_service
        .change_role(&auth.claims, user_id.into_inner(), role)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(user)),
        Err(e) => handle_domain_error(e),
    }
}
