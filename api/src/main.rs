use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use nyaya_api::{create_app, AppState};
use nyaya_core::services::{
    AuditTrailService, AuthService, AuthorizationGate, CaseService, EvidenceIntakeService,
    PasswordService, TokenService, TokenServiceConfig,
};
use nyaya_infra::{
    DatabasePool, LocalDiskArtifactStore, MySqlAuditLogRepository, MySqlCaseRepository,
    MySqlEvidenceRepository, MySqlUserRepository,
};
use nyaya_shared::{AppConfig, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config.logging);
    config.validate().context("invalid configuration")?;

    info!("Starting Nyaya API Server ({})", config.environment);

    // Datastore is ready before any traffic is accepted
    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to create database pool")?;
    pool.run_migrations()
        .await
        .context("failed to apply database migrations")?;

    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let cases = Arc::new(MySqlCaseRepository::new(pool.get_pool().clone()));
    let evidence = Arc::new(MySqlEvidenceRepository::new(pool.get_pool().clone()));
    let audit = Arc::new(MySqlAuditLogRepository::new(pool.get_pool().clone()));
    let store = Arc::new(
        LocalDiskArtifactStore::new(&config.storage).context("failed to prepare upload directory")?,
    );

    let gate = Arc::new(AuthorizationGate::new(&config.auth.authorization));
    let passwords = Arc::new(PasswordService::new(&config.auth.password)?);
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));

    let state = web::Data::new(AppState {
        auth_service: Arc::new(AuthService::new(
            users,
            passwords,
            Arc::clone(&tokens),
            Arc::clone(&gate),
        )),
        case_service: Arc::new(CaseService::new(
            Arc::clone(&cases),
            Arc::clone(&evidence),
            Arc::clone(&gate),
        )),
        evidence_service: Arc::new(EvidenceIntakeService::new(
            Arc::clone(&cases),
            evidence,
            store,
            Arc::clone(&gate),
            config.storage.max_upload_bytes,
        )),
        audit_service: Arc::new(AuditTrailService::new(cases, audit, gate)),
        token_service: tokens,
        health: Arc::new(pool.clone()),
    });

    let environment = config.environment;
    let max_json_payload = config.server.max_json_payload;
    let bind_address = config.server.bind_address();

    let mut server = HttpServer::new(move || create_app(state.clone(), environment, max_json_payload))
        .shutdown_timeout(config.server.shutdown_timeout);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    info!("Server will bind to: {}", bind_address);
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    // run() resolves after SIGINT/SIGTERM once workers have drained
    info!("Server stopped, closing database pool");
    pool.close().await;
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&logging.level));
    if !logging.timestamp {
        builder.format_timestamp(None);
    }
    builder.init();
}
