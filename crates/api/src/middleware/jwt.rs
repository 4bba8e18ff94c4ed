//! # Access Tokens
//!
//! HS256 JSON Web Tokens issued on login and checked by
//! [`auth_middleware`](crate::middleware::auth::auth_middleware).

use chrono::{DateTime, Duration, Utc};
use cutandgo_core::errors::BookingError;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtSettings;

/// JWT claims carried by every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub name: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Not before (timestamp)
    pub nbf: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: &str, name: &str, settings: &JwtSettings, issued_at: DateTime<Utc>) -> Self {
        let exp = issued_at + Duration::minutes(settings.expiration_minutes);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            iss: settings.issuer.clone(),
            aud: settings.audience.clone(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Signs an access token for the user, valid from now.
pub fn issue_token(user_id: Uuid, email: &str, name: &str, settings: &JwtSettings) -> Result<String, BookingError> {
    encode_claims(&Claims::new(user_id, email, name, settings, Utc::now()), settings)
}

pub fn encode_claims(claims: &Claims, settings: &JwtSettings) -> Result<String, BookingError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| BookingError::Internal(Box::new(e)))
}

/// Checks signature, issuer, audience and validity window.
pub fn verify_token(token: &str, settings: &JwtSettings) -> Result<Claims, BookingError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation.validate_nbf = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let message = match e.kind() {
            ErrorKind::ExpiredSignature => "Token has expired".to_string(),
            ErrorKind::InvalidSignature => "Invalid token signature".to_string(),
            ErrorKind::InvalidAudience => "Invalid token audience".to_string(),
            ErrorKind::InvalidIssuer => "Invalid token issuer".to_string(),
            ErrorKind::ImmatureSignature => "Token is not valid yet".to_string(),
            _ => format!("Token validation failed: {}", e),
        };
        BookingError::Authentication(message)
    })
}
