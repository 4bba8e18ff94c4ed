use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use cutandgo_core::errors::{BookingError, BookingResult};
use cutandgo_core::models::hairdresser::image_name;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::hairdresser::{delete_hairdresser_in, lock_hairdresser};
use crate::models::DbUser;
use crate::{db_error, is_unique_violation};

/// Profile fields accepted on registration and update.
#[derive(Debug, Clone)]
pub struct UserInput<'a> {
    pub name: &'a str,
    pub last_name: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub image_extension: Option<&'a str>,
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    tracing::debug!("Getting user by id: {}", id);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, last_name, phone, email, email_confirmed, image,
               password_hash, temp_token, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, last_name, phone, email, email_confirmed, image,
               password_hash, temp_token, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email.trim().to_lowercase())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Registers a user. `password_hash` must already be an argon2 PHC string.
pub async fn create_user(
    pool: &Pool<Postgres>,
    input: &UserInput<'_>,
    password_hash: &str,
) -> BookingResult<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let email = input.email.trim().to_lowercase();
    let image = image_name("user", id, input.image_extension);

    tracing::debug!("Creating user: id={}, email={}", id, email);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, last_name, phone, email, email_confirmed, image,
                           password_hash, temp_token, created_at)
        VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7, '', $8)
        RETURNING id, name, last_name, phone, email, email_confirmed, image,
                  password_hash, temp_token, created_at
        "#,
    )
    .bind(id)
    .bind(input.name)
    .bind(input.last_name)
    .bind(input.phone)
    .bind(&email)
    .bind(image)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| email_conflict(e, &email))?;

    tracing::debug!("User created successfully: id={}", id);
    Ok(user)
}

pub async fn update_user(
    pool: &Pool<Postgres>,
    id: Uuid,
    input: &UserInput<'_>,
) -> BookingResult<Option<DbUser>> {
    let email = input.email.trim().to_lowercase();
    let image = image_name("user", id, input.image_extension);

    tracing::debug!("Updating user: id={}", id);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET name = $2, last_name = $3, phone = $4,
            email_confirmed = email_confirmed AND email = $5,
            email = $5,
            image = CASE WHEN $6 = '' THEN image ELSE $6 END
        WHERE id = $1
        RETURNING id, name, last_name, phone, email, email_confirmed, image,
                  password_hash, temp_token, created_at
        "#,
    )
    .bind(id)
    .bind(input.name)
    .bind(input.last_name)
    .bind(input.phone)
    .bind(&email)
    .bind(image)
    .fetch_optional(pool)
    .await
    .map_err(|e| email_conflict(e, &email))?;

    Ok(user)
}

/// Marks the e-mail as confirmed and clears the temp token.
pub async fn confirm_email(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    tracing::debug!("Confirming email of user: {}", id);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET email_confirmed = TRUE, temp_token = ''
        WHERE id = $1
        RETURNING id, name, last_name, phone, email, email_confirmed, image,
                  password_hash, temp_token, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Looks the user up by e-mail and checks the password against the stored
/// hash. Unknown e-mail and wrong password fail the same way.
pub async fn verify_credentials(
    pool: &Pool<Postgres>,
    email: &str,
    password: &str,
) -> BookingResult<DbUser> {
    let invalid = || BookingError::Authentication("Invalid email or password".to_string());

    let user = get_user_by_email(pool, email).await?.ok_or_else(invalid)?;

    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| eyre!("Invalid password hash: {}", e))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::warn!("Failed login attempt for user {}", user.id);
        return Err(invalid());
    }

    Ok(user)
}

/// Deletes a user in one transaction.
///
/// Salons where the user is the only admin are deleted along with it; in
/// salons with other admins only the admin link goes. The user's own
/// appointments and their service links are removed as well.
pub async fn delete_user(pool: &Pool<Postgres>, id: Uuid) -> BookingResult<()> {
    tracing::debug!("Deleting user: {}", id);

    let mut tx = pool.begin().await.map_err(db_error)?;

    let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;

    if exists.is_none() {
        return Err(BookingError::NotFound(format!("User {} not found", id)));
    }

    // Administered salons are locked in id order before co-admins are counted.
    let administered = sqlx::query_scalar::<_, Uuid>(
        "SELECT hairdresser_id FROM admins WHERE user_id = $1 ORDER BY hairdresser_id",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await
    .map_err(db_error)?;

    for hairdresser_id in &administered {
        lock_hairdresser(&mut tx, *hairdresser_id).await.map_err(db_error)?;
    }

    let salons = sqlx::query_as::<_, (Uuid, i64)>(
        r#"
        SELECT a.hairdresser_id,
               (SELECT COUNT(*) FROM admins o
                WHERE o.hairdresser_id = a.hairdresser_id AND o.user_id <> a.user_id)
        FROM admins a
        WHERE a.user_id = $1
        "#,
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await
    .map_err(db_error)?;

    for (hairdresser_id, other_admins) in salons {
        if other_admins > 0 {
            sqlx::query("DELETE FROM admins WHERE hairdresser_id = $1 AND user_id = $2")
                .bind(hairdresser_id)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        } else {
            tracing::info!("Deleting hairdresser {} along with its last admin {}", hairdresser_id, id);
            delete_hairdresser_in(&mut tx, hairdresser_id)
                .await
                .map_err(db_error)?;
        }
    }

    sqlx::query(
        r#"
        DELETE FROM appointment_services
        WHERE appointment_id IN (SELECT id FROM appointments WHERE user_id = $1)
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(db_error)?;

    sqlx::query("DELETE FROM appointments WHERE user_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

    tx.commit().await.map_err(db_error)?;

    tracing::info!("User {} deleted", id);
    Ok(())
}

fn email_conflict(err: sqlx::Error, email: &str) -> BookingError {
    if is_unique_violation(&err) {
        BookingError::Duplicate(format!("Email {} is already registered", email))
    } else {
        db_error(err)
    }
}
