use axum::http::StatusCode;
use chrono::Utc;
use cutandgo_api::middleware::{auth::AuthUser, error_handling::AppError};
use cutandgo_core::{errors::BookingError, models::admin::AdminRole};
use cutandgo_db::models::{DbAdmin, DbUser};
use fake::{
    faker::{internet::en::SafeEmail, name::en::FirstName},
    Fake,
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

use crate::test_utils::TestContext;

fn caller() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        email: SafeEmail().fake(),
        name: FirstName().fake(),
    }
}

// Mirrors the role gate in front of salon management routes
async fn require_role_wrapper(
    ctx: &mut TestContext,
    hairdresser_id: Uuid,
    auth: &AuthUser,
    required: AdminRole,
) -> Result<AdminRole, AppError> {
    let admin = ctx
        .admin_repo
        .get_admin(hairdresser_id, auth.user_id)
        .await?
        .ok_or_else(|| BookingError::Authorization("Not an admin of this hairdresser".to_string()))?;
    let role = AdminRole::try_from(admin.role)?;

    if !role.can_manage(required) {
        return Err(BookingError::Authorization(format!("Requires the {:?} role or higher", required)).into());
    }

    Ok(role)
}

#[rstest]
#[case(AdminRole::Owner, AdminRole::Manager, true)]
#[case(AdminRole::Manager, AdminRole::Manager, true)]
#[case(AdminRole::Supervisor, AdminRole::Manager, false)]
#[case(AdminRole::Employee, AdminRole::Owner, false)]
#[tokio::test]
async fn test_role_gate(#[case] held: AdminRole, #[case] required: AdminRole, #[case] allowed: bool) {
    let mut ctx = TestContext::new();
    let hairdresser_id = Uuid::new_v4();
    let auth = caller();
    let user_id = auth.user_id;

    ctx.admin_repo
        .expect_get_admin()
        .with(predicate::eq(hairdresser_id), predicate::eq(user_id))
        .times(1)
        .returning(move |hairdresser_id, user_id| {
            Ok(Some(DbAdmin {
                hairdresser_id,
                user_id,
                role: held.as_i16(),
            }))
        });

    let result = require_role_wrapper(&mut ctx, hairdresser_id, &auth, required).await;

    match result {
        Ok(role) => {
            assert!(allowed);
            assert_eq!(role, held);
        }
        Err(error) => {
            assert!(!allowed);
            assert_eq!(error.status(), StatusCode::FORBIDDEN);
        }
    }
}

#[test_log::test(tokio::test)]
async fn test_strangers_are_refused() {
    let mut ctx = TestContext::new();
    let auth = caller();

    ctx.admin_repo.expect_get_admin().returning(|_, _| Ok(None));

    let error = require_role_wrapper(&mut ctx, Uuid::new_v4(), &auth, AdminRole::Employee)
        .await
        .unwrap_err();

    assert_eq!(error.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_granting_an_existing_admin_is_a_duplicate() {
    let mut ctx = TestContext::new();
    let hairdresser_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    ctx.admin_repo
        .expect_create_admin()
        .with(
            predicate::eq(hairdresser_id),
            predicate::eq(user_id),
            predicate::eq(AdminRole::Employee),
        )
        .returning(|_, _, _| Err(BookingError::Duplicate("User is already an admin".to_string())));

    let error: AppError = ctx
        .admin_repo
        .create_admin(hairdresser_id, user_id, AdminRole::Employee)
        .await
        .unwrap_err()
        .into();

    assert_eq!(error.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let mut ctx = TestContext::new();

    ctx.user_repo
        .expect_verify_credentials()
        .with(predicate::eq("ana@example.com"), predicate::eq("wrong"))
        .returning(|_, _| Err(BookingError::Authentication("Invalid email or password".to_string())));

    let error: AppError = ctx
        .user_repo
        .verify_credentials("ana@example.com", "wrong")
        .await
        .unwrap_err()
        .into();

    assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_returns_the_account() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();

    ctx.user_repo
        .expect_verify_credentials()
        .returning(move |email, _| {
            Ok(DbUser {
                id: user_id,
                name: "Ana".to_string(),
                last_name: "Lopez".to_string(),
                phone: "600000000".to_string(),
                email: email.to_string(),
                email_confirmed: true,
                image: "default.png".to_string(),
                password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
                temp_token: String::new(),
                created_at: Utc::now(),
            })
        });

    let user = ctx
        .user_repo
        .verify_credentials("ana@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "ana@example.com");
}
