mod common;

use actix_web::{http::header::AUTHORIZATION, http::StatusCode, test};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};

use nyaya_api::create_app;
use nyaya_core::domain::entities::audit::AuditAction;
use nyaya_core::domain::entities::case::Task;
use nyaya_core::domain::entities::user::Role;
use nyaya_shared::Environment;

use common::{Harness, MAX_JSON_PAYLOAD};

macro_rules! init_app {
    ($harness:expr) => {
        test::init_service(create_app(
            $harness.state.clone(),
            Environment::Development,
            MAX_JSON_PAYLOAD,
        ))
        .await
    };
}

fn register_body(email: &str, password: &str, role: &str, firm_id: Option<i64>) -> Value {
    json!({ "email": email, "password": password, "role": role, "firm_id": firm_id })
}

#[actix_rt::test]
async fn test_register_then_login_yields_token_for_firm() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/nyaya/register")
        .set_json(register_body("alice@firm.com", "pw123", "lawyer", Some(1)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "alice@firm.com");
    assert!(body["data"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/nyaya/login")
        .set_json(json!({ "email": "alice@firm.com", "password": "pw123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let token = body["token"].as_str().unwrap();
    let claims = harness.tokens.validate(token).unwrap();
    assert_eq!(claims.role, Role::Lawyer);
    assert_eq!(claims.firm_id, Some(1));
    assert_eq!(body["user"]["role"], "lawyer");
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/nyaya/register")
        .set_json(register_body("alice@firm.com", "pw123", "lawyer", Some(1)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let mut bodies = Vec::new();
    for (email, password) in [("alice@firm.com", "wrong"), ("nobody@firm.com", "pw123")] {
        let req = test::TestRequest::post()
            .uri("/api/nyaya/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        bodies.push((body["error"].clone(), body["message"].clone()));
    }
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0].1, "invalid credentials");
}

#[actix_rt::test]
async fn test_register_rejections() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/nyaya/register")
        .set_json(register_body("alice@firm.com", "pw123", "lawyer", Some(1)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/nyaya/register")
        .set_json(register_body("Alice@Firm.com", "other", "staff", Some(1)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/nyaya/register")
        .set_json(register_body("root@nyaya.in", "pw123", "system", None))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/nyaya/register")
        .set_json(register_body("bob@firm.com", "pw123", "lawyer", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["field"], "firm_id");

    let req = test::TestRequest::post()
        .uri("/api/nyaya/register")
        .set_json(register_body("carol@firm.com", "pw123", "paralegal", Some(1)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/nyaya/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    assert_eq!(harness.users.count(), 1);
}

#[actix_rt::test]
async fn test_cases_are_scoped_to_caller_firm() {
    let harness = Harness::new();
    harness.cases.add_case(10, 1, "Sharma v. State");
    harness.cases.add_case(11, 1, "Estate of Rao");
    harness.cases.add_case(20, 2, "Other firm matter");
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/api/nyaya/cases")
        .insert_header((AUTHORIZATION, harness.bearer(5, Role::Lawyer, Some(1))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cases: Vec<Value> = test::read_body_json(resp).await;

    assert_eq!(cases.len(), 2);
    assert!(cases.iter().all(|c| c["firm_id"] == 1));
}

#[actix_rt::test]
async fn test_system_role_sees_all_firms_only_with_bypass() {
    let harness = Harness::with_system_bypass();
    harness.cases.add_case(10, 1, "Sharma v. State");
    harness.cases.add_case(20, 2, "Other firm matter");
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/api/nyaya/cases")
        .insert_header((AUTHORIZATION, harness.bearer(1, Role::System, None)))
        .to_request();
    let cases: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cases.len(), 2);

    let harness = Harness::new();
    harness.cases.add_case(10, 1, "Sharma v. State");
    let app = init_app!(harness);

    let req = test::TestRequest::get()
        .uri("/api/nyaya/cases")
        .insert_header((AUTHORIZATION, harness.bearer(1, Role::System, None)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_protected_routes_require_valid_token() {
    let harness = Harness::new();
    harness.cases.add_case(10, 1, "Sharma v. State");
    let app = init_app!(harness);

    let req = test::TestRequest::get().uri("/api/nyaya/cases").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let stale = harness
        .tokens
        .issue_at(5, Role::Lawyer, Some(1), Utc::now() - Duration::hours(13))
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/nyaya/tasks/10")
        .insert_header((AUTHORIZATION, format!("Bearer {}", stale.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "invalid or expired token");

    let token = harness.bearer(5, Role::Lawyer, Some(1));
    let tampered = format!("{}x", token);
    let req = test::TestRequest::get()
        .uri("/api/nyaya/cases")
        .insert_header((AUTHORIZATION, tampered))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_tasks_hide_foreign_and_missing_cases_alike() {
    let harness = Harness::new();
    harness.cases.add_case(10, 1, "Sharma v. State");
    harness.cases.add_case(20, 2, "Other firm matter");
    harness.cases.add_task(Task {
        id: 1,
        case_id: 10,
        title: "File vakalatnama".to_string(),
        status: "open".to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 11, 2),
    });
    harness.cases.add_task(Task {
        id: 2,
        case_id: 10,
        title: "Collect exhibits".to_string(),
        status: "open".to_string(),
        due_date: None,
    });
    let app = init_app!(harness);
    let bearer = harness.bearer(5, Role::Lawyer, Some(1));

    let req = test::TestRequest::get()
        .uri("/api/nyaya/tasks/10")
        .insert_header((AUTHORIZATION, bearer.clone()))
        .to_request();
    let tasks: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["due_date"], "2026-11-02");
    assert!(tasks[1]["due_date"].is_null());

    let mut bodies = Vec::new();
    for uri in ["/api/nyaya/tasks/20", "/api/nyaya/tasks/999"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((AUTHORIZATION, bearer.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        bodies.push(body["message"].clone());
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[actix_rt::test]
async fn test_admin_resets_password_with_audit_entry() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let mut ids = Vec::new();
    for (email, role) in [("admin@firm.com", "admin"), ("junior@firm.com", "lawyer")] {
        let req = test::TestRequest::post()
            .uri("/api/nyaya/register")
            .set_json(register_body(email, "old-password", role, Some(1)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(body["data"]["id"].as_i64().unwrap());
    }
    let (admin_id, junior_id) = (ids[0], ids[1]);

    // a lawyer may not reset anyone
    let req = test::TestRequest::post()
        .uri(&format!("/api/nyaya/admin/users/{}/password", admin_id))
        .insert_header((AUTHORIZATION, harness.bearer(junior_id, Role::Lawyer, Some(1))))
        .set_json(json!({ "new_password": "taken-over" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // nor may an admin of another firm
    let req = test::TestRequest::post()
        .uri(&format!("/api/nyaya/admin/users/{}/password", junior_id))
        .insert_header((AUTHORIZATION, harness.bearer(99, Role::Admin, Some(2))))
        .set_json(json!({ "new_password": "taken-over" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/nyaya/admin/users/{}/password", junior_id))
        .insert_header((AUTHORIZATION, harness.bearer(admin_id, Role::Admin, Some(1))))
        .set_json(json!({ "new_password": "fresh-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::post()
        .uri("/api/nyaya/login")
        .set_json(json!({ "email": "junior@firm.com", "password": "fresh-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let logs = harness.audit.get_all_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, AuditAction::CredentialReset);
    assert_eq!(logs[0].actor_id, admin_id);
}

#[actix_rt::test]
async fn test_admin_changes_role() {
    let harness = Harness::new();
    let app = init_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/nyaya/register")
        .set_json(register_body("junior@firm.com", "pw123", "staff", Some(1)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let junior_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/nyaya/admin/users/{}/role", junior_id))
        .insert_header((AUTHORIZATION, harness.bearer(100, Role::Admin, Some(1))))
        .set_json(json!({ "role": "lawyer" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["role"], "lawyer");

    let req = test::TestRequest::put()
        .uri(&format!("/api/nyaya/admin/users/{}/role", junior_id))
        .insert_header((AUTHORIZATION, harness.bearer(100, Role::Admin, Some(1))))
        .set_json(json!({ "role": "system" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let logs = harness.audit.get_all_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, AuditAction::RoleChange);
}

#[actix_rt::test]
async fn test_health_reflects_database() {
    let harness = Harness::new();
    let app = init_app!(harness);
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let harness = Harness::with_database_down();
    let app = init_app!(harness);
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["database"], "unhealthy");
}

#[actix_rt::test]
async fn test_unknown_route_is_json_404() {
    let harness = Harness::new();
    let app = init_app!(harness);
    let req = test::TestRequest::get().uri("/api/nyaya/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
