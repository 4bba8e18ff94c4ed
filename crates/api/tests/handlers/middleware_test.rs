use argon2::PasswordVerifier;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use cutandgo_api::{
    config::JwtSettings,
    middleware::{
        auth::{self, AuthUser},
        error_handling::{map_error, AppError},
        jwt::{encode_claims, issue_token, verify_token, Claims},
    },
};
use cutandgo_core::{
    errors::{BookingError, ErrorCode},
    validation::ScheduleRowConflict,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

use crate::test_utils::{jwt_settings, token_for};

#[rstest]
#[case(BookingError::NotFound("Resource not found".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Duplicate("Email taken".into()), StatusCode::CONFLICT)]
#[case(BookingError::Conflict("Last schedule".into()), StatusCode::CONFLICT)]
#[case(BookingError::Authentication("Invalid password".into()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Authorization("Not authorized".into()), StatusCode::FORBIDDEN)]
#[case(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[rstest]
#[case(ScheduleRowConflict::InvalidRange, StatusCode::BAD_REQUEST)]
#[case(ScheduleRowConflict::Duplicate { row_id: None }, StatusCode::CONFLICT)]
#[case(ScheduleRowConflict::OverwriteRange { row_id: Some(Uuid::nil()) }, StatusCode::CONFLICT)]
fn test_schedule_row_conflict_status(#[case] conflict: ScheduleRowConflict, #[case] expected: StatusCode) {
    assert_eq!(AppError::from(conflict).status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_code() {
    let response = map_error(BookingError::ScheduleRow(ScheduleRowConflict::OverwriteRange {
        row_id: None,
    }));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["code"], serde_json::json!(ErrorCode::OverwriteRange));
    assert_eq!(body["code"], "OVERWRITE_RANGE");
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let response = map_error(BookingError::Database(eyre::eyre!("relation \"users\" does not exist")));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["code"], "GENERAL_ERROR");
}

#[test]
fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[test]
fn test_hashed_password_verifies() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    let argon2 = argon2::Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&hashed).unwrap();

    assert!(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok());
    assert!(argon2.verify_password("wrong_password".as_bytes(), &parsed_hash).is_err());
}

#[test]
fn test_hash_uses_fresh_salt() {
    let first = auth::hash_password("same").unwrap();
    let second = auth::hash_password("same").unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_token_round_trip() {
    let settings = jwt_settings();
    let user_id = Uuid::new_v4();

    let token = issue_token(user_id, "ana@example.com", "Ana", &settings).unwrap();
    let claims = verify_token(&token, &settings).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "ana@example.com");
    assert_eq!(claims.iss, settings.issuer);
    assert_eq!(claims.aud, settings.audience);
    assert_eq!(claims.exp - claims.iat, settings.expiration_minutes * 60);
}

#[test]
fn test_expired_token_is_rejected() {
    let settings = jwt_settings();
    let token = token_for(Uuid::new_v4(), Utc::now() - Duration::hours(2));

    match verify_token(&token, &settings) {
        Err(BookingError::Authentication(message)) => assert_eq!(message, "Token has expired"),
        other => panic!("Expected expired token error, got: {:?}", other.map(|c| c.sub)),
    }
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let settings = jwt_settings();
    let other = JwtSettings {
        secret: "another-secret".to_string(),
        ..jwt_settings()
    };
    let token = issue_token(Uuid::new_v4(), "ana@example.com", "Ana", &other).unwrap();

    match verify_token(&token, &settings) {
        Err(BookingError::Authentication(message)) => assert_eq!(message, "Invalid token signature"),
        other => panic!("Expected signature error, got: {:?}", other.map(|c| c.sub)),
    }
}

#[test]
fn test_token_for_other_audience_is_rejected() {
    let settings = jwt_settings();
    let other = JwtSettings {
        audience: "someone-else".to_string(),
        ..jwt_settings()
    };
    let token = issue_token(Uuid::new_v4(), "ana@example.com", "Ana", &other).unwrap();

    let result = verify_token(&token, &settings);
    assert!(matches!(result, Err(BookingError::Authentication(_))));
}

#[test]
fn test_auth_user_from_claims() {
    let settings = jwt_settings();
    let user_id = Uuid::new_v4();
    let claims = Claims::new(user_id, "ana@example.com", "Ana", &settings, Utc::now());

    let user = AuthUser::try_from(claims).unwrap();

    assert_eq!(
        user,
        AuthUser {
            user_id,
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
        }
    );
    assert!(user.ensure_is(user_id).is_ok());
    assert!(matches!(
        user.ensure_is(Uuid::new_v4()),
        Err(BookingError::Authorization(_))
    ));
}

#[test]
fn test_claims_with_bad_subject_are_rejected() {
    let settings = jwt_settings();
    let mut claims = Claims::new(Uuid::new_v4(), "ana@example.com", "Ana", &settings, Utc::now());
    claims.sub = "not-a-uuid".to_string();

    let token = encode_claims(&claims, &settings).unwrap();
    let verified = verify_token(&token, &settings).unwrap();

    assert!(matches!(
        AuthUser::try_from(verified),
        Err(BookingError::Authentication(_))
    ));
}
