//! Shared harness: the real route table over in-memory repositories

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use nyaya_api::{AppState, StaticHealth};
use nyaya_core::domain::entities::user::{FirmId, Role, UserId};
use nyaya_core::repositories::{
    MockArtifactStore, MockAuditLogRepository, MockCaseRepository, MockEvidenceRepository,
    MockUserRepository,
};
use nyaya_core::services::{
    AuditTrailService, AuthService, AuthorizationGate, CaseService, EvidenceIntakeService,
    PasswordService, TokenService, TokenServiceConfig,
};
use nyaya_shared::{AuthorizationConfig, PasswordConfig};

pub const MAX_UPLOAD_BYTES: usize = 1024;
pub const MAX_JSON_PAYLOAD: usize = 64 * 1024;
pub const BOUNDARY: &str = "----nyaya-test-boundary";

pub type TestState = AppState<
    MockUserRepository,
    MockCaseRepository,
    MockEvidenceRepository,
    MockAuditLogRepository,
    MockArtifactStore,
>;

pub struct Harness {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub cases: Arc<MockCaseRepository>,
    pub evidence: Arc<MockEvidenceRepository>,
    pub audit: Arc<MockAuditLogRepository>,
    pub store: Arc<MockArtifactStore>,
    pub tokens: Arc<TokenService>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(false, true)
    }

    pub fn with_system_bypass() -> Self {
        Self::build(true, true)
    }

    pub fn with_database_down() -> Self {
        Self::build(false, false)
    }

    fn build(system_role_bypass: bool, database_ok: bool) -> Self {
        let audit = Arc::new(MockAuditLogRepository::new());
        let users = Arc::new(MockUserRepository::with_audit_log(&audit));
        let cases = Arc::new(MockCaseRepository::new());
        let evidence = Arc::new(MockEvidenceRepository::new(&audit));
        let store = Arc::new(MockArtifactStore::new());

        let gate = Arc::new(AuthorizationGate::new(&AuthorizationConfig { system_role_bypass }));
        let passwords = Arc::new(PasswordService::new(&PasswordConfig::with_cost(4)).unwrap());
        let tokens = Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "integration-test-secret-with-enough-bytes".to_string(),
            ..TokenServiceConfig::default()
        }));

        let state = web::Data::new(AppState {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                passwords,
                tokens.clone(),
                gate.clone(),
            )),
            case_service: Arc::new(CaseService::new(cases.clone(), evidence.clone(), gate.clone())),
            evidence_service: Arc::new(EvidenceIntakeService::new(
                cases.clone(),
                evidence.clone(),
                store.clone(),
                gate.clone(),
                MAX_UPLOAD_BYTES,
            )),
            audit_service: Arc::new(AuditTrailService::new(cases.clone(), audit.clone(), gate)),
            token_service: tokens.clone(),
            health: Arc::new(StaticHealth(database_ok)),
        });

        Self {
            state,
            users,
            cases,
            evidence,
            audit,
            store,
            tokens,
        }
    }

    /// Bearer header value for a session that never touched /login
    pub fn bearer(&self, user_id: UserId, role: Role, firm_id: Option<FirmId>) -> String {
        let issued = self.tokens.issue(user_id, role, firm_id).unwrap();
        format!("Bearer {}", issued.token)
    }
}

/// One multipart part: field name, optional filename, content
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            content: value.as_bytes(),
        }
    }

    pub fn file(filename: &'a str, content: &'a [u8]) -> Self {
        Self {
            name: "file",
            filename: Some(filename),
            content,
        }
    }
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
            }
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
