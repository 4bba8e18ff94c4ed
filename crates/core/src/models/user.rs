use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. Password hash and temp token never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub email_confirmed: bool,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub image_extension: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub image_extension: Option<String>,
}

impl CreateUserRequest {
    /// Rejects payloads that cannot become a user row.
    pub fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name must not be empty".to_string());
        }
        if !self.email.contains('@') {
            return Err("Email is not valid".to_string());
        }
        if self.password.len() < 8 {
            return Err("Password must be at least 8 characters long".to_string());
        }
        Ok(())
    }
}
