//! Application factory
//!
//! Builds the actix-web application over any set of repository
//! implementations, so the binary and the integration tests share one
//! route table.

use actix_web::{
    error::InternalError,
    middleware::Logger,
    web, App, HttpResponse,
};

use nyaya_core::repositories::{
    ArtifactStore, AuditLogRepository, CaseRepository, EvidenceRepository, UserRepository,
};
use nyaya_shared::{error_codes, Environment, ErrorResponse};

use crate::middleware::{create_cors, JwtAuth, SecurityMiddleware};
use crate::routes::{admin, audit, auth, cases, evidence, health};
use crate::state::AppState;

/// Mount point of the case-management API
pub const API_SCOPE: &str = "/api/nyaya";

/// Create and configure the application with all dependencies
pub fn create_app<U, C, E, A, S>(
    app_state: web::Data<AppState<U, C, E, A, S>>,
    environment: Environment,
    max_json_payload: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: CaseRepository + 'static,
    E: EvidenceRepository + 'static,
    A: AuditLogRepository + 'static,
    S: ArtifactStore + 'static,
{
    let jwt = JwtAuth::new(app_state.token_service.clone());

    let json_config = web::JsonConfig::default()
        .limit(max_json_payload)
        .error_handler(|err, _req| {
            log::debug!("Rejected JSON body: {}", err);
            let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Malformed request body");
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // last wrapped runs first: security, then CORS, then logging
        .wrap(Logger::default())
        .wrap(create_cors(environment))
        .wrap(SecurityMiddleware::for_environment(environment))
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health::health_check::<U, C, E, A, S>))
        .service(
            web::scope(API_SCOPE)
                .route("/register", web::post().to(auth::register::<U, C, E, A, S>))
                .route("/login", web::post().to(auth::login::<U, C, E, A, S>))
                .route(
                    "/cases",
                    web::get()
                        .to(cases::list_cases::<U, C, E, A, S>)
                        .wrap(jwt.clone()),
                )
                .route(
                    "/tasks/{case_id}",
                    web::get()
                        .to(cases::list_tasks::<U, C, E, A, S>)
                        .wrap(jwt.clone()),
                )
                .route(
                    "/documents/{case_id}",
                    web::get()
                        .to(cases::list_documents::<U, C, E, A, S>)
                        .wrap(jwt.clone()),
                )
                .route(
                    "/upload",
                    web::post()
                        .to(evidence::upload_evidence::<U, C, E, A, S>)
                        .wrap(jwt.clone()),
                )
                .route(
                    "/audit/{case_id}",
                    web::get()
                        .to(audit::case_audit_trail::<U, C, E, A, S>)
                        .wrap(jwt.clone()),
                )
                .route(
                    "/admin/users/{user_id}/password",
                    web::post()
                        .to(admin::reset_password::<U, C, E, A, S>)
                        .wrap(jwt.clone()),
                )
                .route(
                    "/admin/users/{user_id}/role",
                    web::put()
                        .to(admin::change_role::<U, C, E, A, S>)
                        .wrap(jwt),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Nyaya-Lite Backend Running")
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
