//! # Authentication Module
//!
//! Password hashing for new accounts and the bearer-token middleware that
//! guards every non-public route.
//!
//! Passwords are hashed with Argon2 and stored as PHC strings. Verification
//! happens in the user repository on login.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use cutandgo_core::errors::BookingError;
use eyre::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error_handling::AppError;
use super::jwt::{verify_token, Claims};
use crate::ApiState;

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for each call, and the result is a PHC
/// string (algorithm, version, parameters, salt and hash).
///
/// # Example
///
/// ```rust
/// let hashed = cutandgo_api::middleware::auth::hash_password("user_password").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// The caller of a protected route, taken from the verified token.
///
/// Handlers extract it with `Extension<AuthUser>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
}

impl AuthUser {
    /// Refuses the request unless the caller is `user_id`.
    pub fn ensure_is(&self, user_id: Uuid) -> Result<(), BookingError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(BookingError::Authorization(
                "Only the account owner may do this".to_string(),
            ))
        }
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = BookingError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| BookingError::Authentication("Invalid token subject".to_string()))?;

        Ok(Self {
            user_id,
            email: claims.email,
            name: claims.name,
        })
    }
}

/// JWT authentication middleware
///
/// Expects `Authorization: Bearer <token>`. A missing header, a malformed
/// header or a token that fails verification ends the request with `401`.
pub async fn auth_middleware(
    State(state): State<Arc<ApiState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| BookingError::Authentication("Missing authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        BookingError::Authentication(
            "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        )
    })?;

    let claims = verify_token(token, &state.jwt)?;
    let auth_user = AuthUser::try_from(claims)?;

    tracing::debug!("Authenticated request from user {}", auth_user.user_id);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
