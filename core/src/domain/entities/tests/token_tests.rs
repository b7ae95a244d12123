//! Unit tests for session claims

use chrono::{Duration, Utc};

use crate::domain::entities::token::{Claims, SESSION_TOKEN_EXPIRY_HOURS};
use crate::domain::entities::user::Role;
use crate::errors::TokenError;

#[test]
fn test_claims_carry_identity_and_lifetime() {
    let issued = Utc::now();
    let claims = Claims::new(
        42,
        Role::Staff,
        Some(3),
        issued,
        Duration::hours(SESSION_TOKEN_EXPIRY_HOURS),
        "nyaya",
    );

    assert_eq!(claims.user_id().unwrap(), 42);
    assert_eq!(claims.firm_id, Some(3));
    assert_eq!(claims.iss, "nyaya");
    assert_eq!(claims.exp - claims.iat, SESSION_TOKEN_EXPIRY_HOURS * 3600);
    assert_eq!(claims.expires_at().timestamp(), claims.exp);
}

#[test]
fn test_claims_expiry() {
    let issued = Utc::now() - Duration::hours(13);
    let claims = Claims::new(1, Role::Admin, Some(1), issued, Duration::hours(12), "nyaya");

    assert!(claims.is_expired_at(Utc::now()));
    assert!(!claims.is_expired_at(issued + Duration::hours(1)));
}

#[test]
fn test_non_numeric_subject_is_malformed() {
    let mut claims = Claims::new(1, Role::Admin, Some(1), Utc::now(), Duration::hours(1), "nyaya");
    claims.sub = "not-a-number".to_string();

    assert_eq!(claims.user_id(), Err(TokenError::Malformed));
}
