use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable service offered by a salon. Prices are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub hairdresser_id: Uuid,
    pub name: String,
    pub price_cents: i32,
    pub duration_minutes: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub hairdresser_id: Uuid,
    pub name: String,
    pub price_cents: i32,
    pub duration_minutes: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: String,
    pub price_cents: i32,
    pub duration_minutes: i16,
}

impl CreateServiceRequest {
    pub fn check(&self) -> Result<(), String> {
        check_service(&self.name, self.price_cents, self.duration_minutes)
    }
}

impl UpdateServiceRequest {
    pub fn check(&self) -> Result<(), String> {
        check_service(&self.name, self.price_cents, self.duration_minutes)
    }
}

fn check_service(name: &str, price_cents: i32, duration_minutes: i16) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Service name must not be empty".to_string());
    }
    if price_cents < 0 {
        return Err("Price must not be negative".to_string());
    }
    if duration_minutes <= 0 {
        return Err("Duration must be positive".to_string());
    }
    Ok(())
}

/// `?ids=<uuid>,<uuid>` lookup of several services at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceIdsQuery {
    pub ids: String,
}

impl ServiceIdsQuery {
    pub fn parse_ids(&self) -> Result<Vec<Uuid>, String> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Uuid::parse_str(id).map_err(|e| format!("Invalid service id {}: {}", id, e)))
            .collect()
    }
}
