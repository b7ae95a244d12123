//! Unit tests for user entity

use chrono::Utc;
use std::str::FromStr;

use crate::domain::entities::user::{Role, User};
use crate::errors::ValidationError;

fn sample_user() -> User {
    User {
        id: 7,
        email: "lawyer@firm.com".to_string(),
        password_hash: "$2b$04$notarealhash".to_string(),
        role: Role::Lawyer,
        firm_id: Some(1),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_role_parsing_is_case_insensitive() {
    assert_eq!(Role::from_str("Admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str(" staff ").unwrap(), Role::Staff);
    assert_eq!(Role::from_str("system").unwrap(), Role::System);
}

#[test]
fn test_unknown_role_is_rejected() {
    let err = Role::from_str("paralegal").unwrap_err();
    assert_eq!(err, ValidationError::UnknownRole { role: "paralegal".to_string() });
}

#[test]
fn test_only_system_role_is_system_level() {
    assert!(Role::System.is_system_level());
    assert!(!Role::Admin.is_system_level());
    assert!(!Role::Lawyer.is_system_level());
    assert!(!Role::Staff.is_system_level());
}

#[test]
fn test_password_hash_is_never_serialized() {
    let json = serde_json::to_value(sample_user()).unwrap();

    assert!(json.get("password_hash").is_none());
    assert_eq!(json["role"], "lawyer");
    assert_eq!(json["firm_id"], 1);
}

#[test]
fn test_summary_projection() {
    let summary = sample_user().summary();

    assert_eq!(summary.id, 7);
    assert_eq!(summary.email, "lawyer@firm.com");
    assert_eq!(summary.role, Role::Lawyer);
    assert_eq!(summary.firm_id, Some(1));
}
